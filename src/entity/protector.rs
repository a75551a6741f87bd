//! Entity protection and restoration
//!
//! Detected entities are substituted with short synthetic tokens before the
//! text goes to a provider, and substituted back afterwards. A token is
//! `@{index}{L}` where `index` is the entity's position in the detection
//! order and `L` is the uppercased last alphabetic character of the entity
//! ('T' when it has none). The trailing letter keeps `@1X` from being a
//! string prefix of `@11Y`; restoration still runs in descending index order
//! because a restored entity may itself introduce text that looks like a
//! higher-index token.

use crate::entity::detector::EntitySpan;

/// Sentinel terminal letter for entities with no alphabetic character
const FALLBACK_TERMINAL: char = 'T';

/// Uppercased last alphabetic character of the entity
fn terminal_letter(entity: &str) -> String {
    entity
        .chars()
        .rev()
        .find(|c| c.is_alphabetic())
        .unwrap_or(FALLBACK_TERMINAL)
        .to_uppercase()
        .to_string()
}

/// Placeholder token for the entity at the given detection index
pub fn placeholder_token(index: usize, entity: &str) -> String {
    format!("@{}{}", index, terminal_letter(entity))
}

/// Substitute every boundary-anchored occurrence of each entity with its token
///
/// An occurrence counts only when preceded by whitespace or text start and
/// followed by a non-word character or text end, so `data` is substituted in
/// `"data moved"` but left alone in `".data."` or `"database"`. Entities may
/// contain regex metacharacters, so matching is a plain anchored string scan.
pub fn protect(text: &str, entities: &[EntitySpan]) -> String {
    let mut result = text.to_string();
    for (index, entity) in entities.iter().enumerate() {
        let token = placeholder_token(index, &entity.text);
        result = replace_anchored(&result, &entity.text, &token);
    }
    result
}

/// Repair translator-inserted spaces after the token sigil (`"@ "` → `" @"`)
pub fn post_correction(text: &str) -> String {
    text.replace("@ ", " @")
}

/// Substitute placeholder tokens back to their entities
///
/// Plain substring replacement: after translation the whitespace around a
/// token is not reliable. Indices run in descending order; see the module
/// docs for why ascending order can corrupt the text.
pub fn restore(text: &str, entities: &[EntitySpan]) -> String {
    let mut result = text.to_string();
    for (index, entity) in entities.iter().enumerate().rev() {
        let token = placeholder_token(index, &entity.text);
        result = result.replace(&token, &entity.text);
    }
    result
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace occurrences of `needle` that sit on whitespace/word boundaries
fn replace_anchored(text: &str, needle: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(found) = text[pos..].find(needle) {
        let start = pos + found;
        let end = start + needle.len();

        let preceded_ok = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace());
        let followed_ok = !text[end..].chars().next().is_some_and(is_word_char);

        if preceded_ok && followed_ok {
            result.push_str(&text[pos..start]);
            result.push_str(replacement);
            pos = end;
        } else {
            // Skip one character past the rejected occurrence
            let step = text[start..].chars().next().map_or(1, char::len_utf8);
            result.push_str(&text[pos..start + step]);
            pos = start + step;
        }
    }

    result.push_str(&text[pos..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(texts: &[&str]) -> Vec<EntitySpan> {
        texts
            .iter()
            .map(|t| EntitySpan {
                text: t.to_string(),
                start: 0,
                end: t.len(),
            })
            .collect()
    }

    // ========== Token Shape Tests ==========

    #[test]
    fn test_token_uses_last_alphabetic_char() {
        assert_eq!(placeholder_token(0, "Gunicorn"), "@0N");
        assert_eq!(placeholder_token(3, "dyno"), "@3O");
    }

    #[test]
    fn test_token_skips_trailing_digits() {
        assert_eq!(placeholder_token(1, "GPT4"), "@1T");
        assert_eq!(placeholder_token(2, "utf8"), "@2F");
    }

    #[test]
    fn test_token_fallback_when_no_alphabetic_char() {
        assert_eq!(placeholder_token(5, "1234"), "@5T");
    }

    #[test]
    fn test_terminal_letter_never_a_digit() {
        for entity in ["a1", "B2", "x_9", "42"] {
            let token = placeholder_token(7, entity);
            let last = token.chars().last().unwrap();
            assert!(last.is_alphabetic(), "token {:?} ends in non-letter", token);
        }
    }

    // ========== Protection Tests ==========

    #[test]
    fn test_protect_replaces_every_anchored_occurrence() {
        let entities = spans(&["data"]);
        let result = protect("data moved the data again", &entities);
        assert_eq!(result, "@0A moved the @0A again");
    }

    #[test]
    fn test_protect_skips_unanchored_occurrences() {
        let entities = spans(&["data"]);
        let result = protect("data .data. SS-data database data.", &entities);
        assert_eq!(result, "@0A .data. SS-data database @0A.");
    }

    #[test]
    fn test_protect_entity_with_metacharacters() {
        let entities = spans(&["A/B testing"]);
        let result = protect("we ran A/B testing today", &entities);
        assert_eq!(result, "we ran @0G today");
    }

    #[test]
    fn test_protect_indices_follow_entity_order() {
        let entities = spans(&["Gunicorn", "system_processes"]);
        let result = protect("Gunicorn forks system_processes", &entities);
        assert_eq!(result, "@0N forks @1S");
    }

    // ========== Post-Correction Tests ==========

    #[test]
    fn test_post_correction_moves_inserted_space() {
        assert_eq!(post_correction("foo@ 0N bar"), "foo @0N bar");
    }

    #[test]
    fn test_post_correction_no_op_without_stray_space() {
        assert_eq!(post_correction("foo @0N bar"), "foo @0N bar");
    }

    // ========== Restoration Tests ==========

    #[test]
    fn test_restore_reverses_protect() {
        let entities = spans(&["Gunicorn", "system_processes", "dyno"]);
        let text = "Gunicorn forks system_processes within each dyno";
        let protected = protect(text, &entities);
        assert_eq!(restore(&protected, &entities), text);
    }

    #[test]
    fn test_restore_ignores_lost_whitespace() {
        let entities = spans(&["dyno"]);
        // Translators may glue tokens to adjacent characters
        assert_eq!(restore("각@0O안에서", &entities), "각dyno안에서");
    }

    #[test]
    fn test_roundtrip_identity_under_echo_translator() {
        let entities = spans(&["Gunicorn", "worker_processes", "Heroku", "dyno"]);
        let text = "Gunicorn starts worker_processes on each Heroku dyno today";
        let echoed = protect(text, &entities);
        assert_eq!(restore(&echoed, &entities), text);
    }

    #[test]
    fn test_roundtrip_with_more_than_ten_entities() {
        let names = [
            "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india2",
            "juliet", "kilo", "lima", "mike",
        ];
        let entities = spans(&names);
        let text = names.join(" then ");
        let protected = protect(&text, &entities);
        // Two-digit tokens appear once the list passes index 9
        assert!(protected.contains("@12E"));
        assert_eq!(restore(&protected, &entities), text);
    }

    // ========== Restoration Order Regression Guard ==========

    /// A restored entity may itself contain text shaped like a higher-index
    /// token (here "mail@11N" contains entity 11's token "@11N"). Ascending
    /// restoration inserts it early and then clobbers it; descending order
    /// restores index 11 first and the inserted text stays literal.
    #[test]
    fn test_forward_restoration_corrupts_reverse_restores() {
        let names = [
            "zero", "mail@11N", "two", "three", "four", "five", "six", "seven", "eight", "nine",
            "ten", "neon", "twelve",
        ];
        let entities = spans(&names);
        let text = "send mail@11N to neon and twelve others";
        let protected = protect(text, &entities);
        assert_eq!(protected, "send @1N to @11N and @12E others");

        // Descending order round-trips
        assert_eq!(restore(&protected, &entities), text);

        // Ascending order restores entity 1 first, then entity 11 rewrites
        // the "@11N" inside the restored text
        let mut forward = protected.clone();
        for (index, entity) in entities.iter().enumerate() {
            let token = placeholder_token(index, &entity.text);
            forward = forward.replace(&token, &entity.text);
        }
        assert_ne!(forward, text);
        assert!(forward.contains("mailneon"));
    }
}
