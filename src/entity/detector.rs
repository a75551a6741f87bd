//! Entity span detection
//!
//! Finds the substrings of source text that must survive translation intact:
//! proper nouns, ALL-CAPS acronyms, identifier-style tokens, and known domain
//! terms. No trained NER model is involved; four conservative string-boundary
//! rules trade recall for precision so ordinary prose is never corrupted:
//!
//! 1. capitalized word mid-sentence (hyphen chains included),
//! 2. all-caps run at a sentence start,
//! 3. whitespace-delimited token containing an underscore,
//! 4. exact case-insensitive term-dictionary match (plural and hyphen chains
//!    included).
//!
//! The `regex` crate has no lookaround, so the boundary conditions around each
//! candidate are checked against the source string after matching.

use crate::error::{TranslateError, TranslateResult};
use crate::terms::TermDictionary;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// A protectable substring of the source text
///
/// `start`/`end` are byte offsets of the first occurrence. Spans are unique by
/// surface string: every occurrence of the same string is substituted
/// uniformly during protection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Tokens that look like entities to the rules but never are
/// (the pronoun "I" is capitalized mid-sentence by grammar, not by meaning)
const EXCLUDED_TOKENS: [&str; 1] = ["I"];

/// Rule-based entity detector
///
/// Compiled once per process against a load-once [`TermDictionary`]; safe to
/// share across concurrent runs.
pub struct EntityDetector {
    /// Rule 1: capitalized token, optionally hyphen-chained
    capital_prefix: Regex,
    /// Rule 2: all-uppercase run (two or more letter chunks)
    all_caps: Regex,
    /// Rule 3: token containing at least one underscore
    underscore: Regex,
    /// Rule 4: combined case-insensitive dictionary pattern (None when the
    /// dictionary is empty)
    dictionary: Option<Regex>,
}

impl EntityDetector {
    pub fn new(terms: Arc<TermDictionary>) -> TranslateResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| TranslateError::PatternError(e.to_string()))
        };

        let dictionary = if terms.is_empty() {
            None
        } else {
            let joined = terms
                .terms()
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            // Term, optional plural suffix, optional hyphen chains on both sides
            Some(compile(&format!(
                r"(?i)(?:[a-z0-9]*-)*(?:{})(?:es|s)?(?:-[a-z0-9]*)*",
                joined
            ))?)
        };

        Ok(EntityDetector {
            capital_prefix: compile(r"(?:[A-Za-z0-9]*-)*[A-Z]\w*(?:-[A-Za-z0-9]*)*")?,
            all_caps: compile(r"(?:[A-Z]+[a-z]*){2,}")?,
            underscore: compile(r"\w*(?:_\w*)+")?,
            dictionary,
        })
    }

    /// Detect entity spans in the text
    ///
    /// Returns unique surface strings in deterministic first-detected order
    /// (rule 1 → 2 → 3 → 4, left to right within each rule); this order is
    /// what assigns placeholder indices, so it must never depend on hash
    /// iteration. Spans nested inside a longer detected span are dropped.
    pub fn detect(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans: Vec<EntitySpan> = Vec::new();

        // Rule 1: capitalized mid-sentence, preceded by <non-backslash><word><space>
        for m in self.capital_prefix.find_iter(text) {
            if capital_prefix_context(text, m.start()) {
                add_span(&mut spans, m.as_str(), m.start(), m.end());
            }
        }

        // Rule 2: all-caps run anchored at a sentence boundary, followed by whitespace
        for m in self.all_caps.find_iter(text) {
            if sentence_start_context(text, m.start()) && followed_by_whitespace(text, m.end()) {
                add_span(&mut spans, m.as_str(), m.start(), m.end());
            }
        }

        // Rule 3: underscore token, preceded by whitespace or text start.
        // A maximal \w run is already delimited on the right.
        for m in self.underscore.find_iter(text) {
            if preceded_by_whitespace_or_start(text, m.start()) {
                add_span(&mut spans, m.as_str(), m.start(), m.end());
            }
        }

        // Rule 4: dictionary terms, boundary-anchored on both sides
        if let Some(dictionary) = &self.dictionary {
            for m in dictionary.find_iter(text) {
                if preceded_by_whitespace_or_start(text, m.start())
                    && not_followed_by_word(text, m.end())
                {
                    add_span(&mut spans, m.as_str(), m.start(), m.end());
                }
            }
        }

        // Drop spans strictly contained in a longer detected span
        let ranges: Vec<(usize, usize)> = spans.iter().map(|s| (s.start, s.end)).collect();
        spans.retain(|s| {
            !ranges.iter().any(|&(start, end)| {
                start <= s.start && s.end <= end && (end - start) > (s.end - s.start)
            })
        });

        debug!(count = spans.len(), "Detected entity spans");
        spans
    }
}

fn add_span(spans: &mut Vec<EntitySpan>, text: &str, start: usize, end: usize) {
    if EXCLUDED_TOKENS.contains(&text) {
        return;
    }
    if spans.iter().any(|s| s.text == text) {
        return;
    }
    spans.push(EntitySpan {
        text: text.to_string(),
        start,
        end,
    });
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Rule 1 left context: the three preceding characters are
/// `<anything but backslash><word char><space>`. Sentence-initial positions
/// have no such context and are deliberately rejected.
fn capital_prefix_context(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();
    let (Some(c1), Some(c2), Some(c3)) = (before.next(), before.next(), before.next()) else {
        return false;
    };
    c1 == ' ' && is_word_char(c2) && c3 != '\\'
}

/// Rule 2 left context: text start, right after a newline, or right after
/// a period and one whitespace character
fn sentence_start_context(text: &str, start: usize) -> bool {
    if start == 0 {
        return true;
    }
    let mut before = text[..start].chars().rev();
    let Some(c1) = before.next() else { return true };
    if c1 == '\n' {
        return true;
    }
    c1.is_whitespace() && before.next() == Some('.')
}

fn followed_by_whitespace(text: &str, end: usize) -> bool {
    text[end..].chars().next().is_some_and(|c| c.is_whitespace())
}

fn preceded_by_whitespace_or_start(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_none_or(|c| c.is_whitespace())
}

fn not_followed_by_word(text: &str, end: usize) -> bool {
    !text[end..].chars().next().is_some_and(is_word_char)
}
