//! Source text preprocessing
//!
//! Providers document per-request character limits. Overlong input is cut at
//! the nearest sentence or clause boundary before the limit so the provider
//! sees a well-formed fragment rather than a mid-word chop.

/// Marker appended to text that was cut short
pub const ELLIPSIS: &str = "...";

/// Characters treated as safe cut points (sentence/clause terminators)
const BOUNDARY_CHARS: [char; 11] = ['.', ':', ';', '!', '?', '<', '>', '(', ')', '[', ']'];

/// Trim the text and bound it to `max_chars` characters
///
/// With no limit the trimmed text is returned unchanged. Otherwise the text
/// is cut at the nearest boundary character at-or-before
/// `max_chars - ELLIPSIS.len()` and the ellipsis marker is appended. When the
/// window holds no boundary character the cut snaps back to the nearest
/// whitespace instead, and only as a last resort falls to a blunt cut at the
/// window edge. Cuts are made on character positions, never inside a code
/// point.
pub fn truncate_to_limit(text: &str, max_chars: Option<usize>) -> String {
    let trimmed = text.trim();
    let Some(max_chars) = max_chars else {
        return trimmed.to_string();
    };

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= max_chars {
        return trimmed.to_string();
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    if max_chars <= ellipsis_len {
        // Degenerate limit, no room for a marker
        return chars[..max_chars].iter().collect();
    }

    let window = max_chars - ellipsis_len;

    // Nearest sentence/clause boundary inside the window
    for i in (0..window).rev() {
        if BOUNDARY_CHARS.contains(&chars[i]) {
            let mut result: String = chars[..=i].iter().collect();
            result.push_str(ELLIPSIS);
            return result;
        }
    }

    // No boundary: snap to the nearest whitespace
    for i in (0..window).rev() {
        if chars[i].is_whitespace() {
            let mut result: String = chars[..i].iter().collect();
            result.push_str(ELLIPSIS);
            return result;
        }
    }

    let mut result: String = chars[..window].iter().collect();
    result.push_str(ELLIPSIS);
    result
}
