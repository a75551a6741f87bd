//! Language identification for the Korean/English pair
//!
//! The fast path is a pure Unicode-range scan for Hangul: if the head of the
//! text contains any Hangul code point the source is Korean, no model needed.
//! Everything else is delegated to an optional external `LanguageDetector`
//! collaborator, and detector failures fall open to English so that language
//! identification can never block a translation run.

use crate::error::TranslateResult;
use tracing::warn;

/// Language code for Korean
pub const LANG_KO: &str = "ko";
/// Language code for English
pub const LANG_EN: &str = "en";
/// Language returned when no signal is available (fail-open default)
pub const FALLBACK_LANG: &str = LANG_EN;

/// The language pair this system translates between
pub const SUPPORTED_LANGS: [&str; 2] = [LANG_KO, LANG_EN];

/// Number of leading characters inspected during language identification
const IDENTIFY_PREFIX_CHARS: usize = 30;

/// External statistical language detector (collaborator contract)
///
/// Implementations wrap whatever model or service does real detection for
/// non-Korean input. `detect` receives only a short prefix of the source text
/// and returns a language code such as `"en"` or `"ja"`.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> TranslateResult<String>;
}

/// Check whether the text contains a Hangul code point
///
/// Scans at most the first `min(char_count - 1, n)` characters when
/// `check_up_to` is `Some(n)`, or every character when `None`. Returns true if
/// any scanned character falls strictly inside one of the five Hangul blocks
/// (jamo, compatibility jamo, extended jamo A/B, and the syllable block).
///
/// Deterministic and prefix-stable: the result depends only on the scanned
/// prefix.
///
/// # Example
///
/// ```ignore
/// assert!(contains_hangul("오늘은 이상한 날이다", None));
/// assert!(!contains_hangul("Today is a strange day.", None));
/// ```
pub fn contains_hangul(text: &str, check_up_to: Option<usize>) -> bool {
    let limit = match check_up_to {
        Some(n) => text.chars().count().saturating_sub(1).min(n),
        None => text.chars().count(),
    };

    for c in text.chars().take(limit) {
        let cp = c as u32;
        if (cp > 0x1100 && cp < 0x11FF)
            || (cp > 0x3131 && cp < 0x318E)
            || (cp > 0xA960 && cp < 0xA97C)
            || (cp > 0xAC00 && cp < 0xD7A3)
            || (cp > 0xD7B0 && cp < 0xD7FB)
        {
            return true;
        }
    }

    false
}

/// Identify the source language of the text
///
/// Hangul in the leading prefix means Korean. Otherwise the external detector
/// (when provided) is consulted on the same prefix; a missing or failing
/// detector yields [`FALLBACK_LANG`] rather than an error, since detection
/// problems must never block translation.
pub fn identify_language(text: &str, detector: Option<&dyn LanguageDetector>) -> String {
    if contains_hangul(text, Some(IDENTIFY_PREFIX_CHARS)) {
        return LANG_KO.to_string();
    }

    let prefix: String = text.chars().take(IDENTIFY_PREFIX_CHARS).collect();
    match detector {
        Some(d) => match d.detect(&prefix) {
            Ok(lang) => lang,
            Err(e) => {
                warn!("Language detector failed ({}); defaulting to {}", e, FALLBACK_LANG);
                FALLBACK_LANG.to_string()
            }
        },
        None => FALLBACK_LANG.to_string(),
    }
}

/// Whether the language code is one the system can translate from
pub fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGS.contains(&lang)
}
