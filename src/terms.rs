//! Term dictionary of known domain jargon
//!
//! A newline-delimited list of terms (e.g. ML vocabulary) loaded once at
//! process start and shared read-only for the lifetime of the process. The
//! entity detector consults it for exact, case-insensitive matches.

use crate::error::{TranslateError, TranslateResult};
use std::path::Path;

/// Load-once, read-only collection of domain terms
///
/// Order is the deterministic first-occurrence order of the source file (or
/// the provided list); duplicates are dropped. Safe to share across
/// concurrent translation runs behind an `Arc` with no locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDictionary {
    terms: Vec<String>,
}

impl TermDictionary {
    /// Build a dictionary from an in-memory list of terms
    ///
    /// Terms are trimmed; blanks and duplicates (first occurrence wins) are
    /// removed. An empty result is allowed here; an empty dictionary simply
    /// disables the dictionary rule.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: Vec<String> = Vec::new();
        for term in terms {
            let term = term.into().trim().to_string();
            if !term.is_empty() && !seen.contains(&term) {
                seen.push(term);
            }
        }
        TermDictionary { terms: seen }
    }

    /// Load a dictionary from a newline-delimited plain-text file
    ///
    /// Loading a file that yields no terms is a fatal startup error.
    pub fn load<P: AsRef<Path>>(path: P) -> TranslateResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslateError::TermDictionaryError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))
        })?;

        let dict = Self::from_terms(content.lines());
        if dict.is_empty() {
            return Err(TranslateError::TermDictionaryError(format!(
                "The term file {} is empty",
                path.display()
            )));
        }

        Ok(dict)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_terms_preserves_first_occurrence_order() {
        let dict = TermDictionary::from_terms(["epoch", "dyno", "epoch", "tensor"]);
        assert_eq!(dict.terms(), &["epoch", "dyno", "tensor"]);
    }

    #[test]
    fn test_from_terms_trims_and_skips_blanks() {
        let dict = TermDictionary::from_terms(["  epoch ", "", "   ", "dyno"]);
        assert_eq!(dict.terms(), &["epoch", "dyno"]);
    }

    #[test]
    fn test_load_newline_delimited_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "epoch").unwrap();
        writeln!(file, "dyno").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "gradient descent").unwrap();

        let dict = TermDictionary::load(file.path()).unwrap();
        assert_eq!(dict.terms(), &["epoch", "dyno", "gradient descent"]);
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_load_empty_file_is_fatal() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = TermDictionary::load(file.path());
        match result {
            Err(TranslateError::TermDictionaryError(msg)) => {
                assert!(msg.contains("empty"));
            }
            _ => panic!("Expected TermDictionaryError for empty file"),
        }
    }

    #[test]
    fn test_load_whitespace_only_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file).unwrap();
        assert!(TermDictionary::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = TermDictionary::load("/nonexistent/terms.txt");
        assert!(result.is_err());
    }
}
