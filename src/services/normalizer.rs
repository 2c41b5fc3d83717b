//! Label normalization service
//!
//! Turns hierarchical object paths into display labels so that records
//! from the same project group under one key.

/// Label used when a path yields nothing displayable
pub const PLACEHOLDER_LABEL: &str = "Unknown";

/// Prefix tokens stripped from the chosen segment
const STRIP_PREFIXES: [&str; 2] = ["piscine-", "quest-"];

/// Derive a display label from a slash-separated path.
///
/// Walks the segments from the end, strips a known prefix from each, and
/// takes the first one that is neither empty nor purely numeric (numeric
/// segments are database ids). The result is split on `-` and title-cased.
///
/// # Examples
/// ```
/// use xpchart::services::normalizer::label_from_path;
///
/// assert_eq!(label_from_path(Some("piscine-go/quest-01/42")), "Go");
/// assert_eq!(label_from_path(Some("/school/make-your-game")), "Make Your Game");
/// assert_eq!(label_from_path(None), "Unknown");
/// ```
pub fn label_from_path(path: Option<&str>) -> String {
    let Some(path) = path else {
        return PLACEHOLDER_LABEL.to_string();
    };

    path.split('/')
        .rev()
        .map(|segment| strip_prefix(segment.trim()))
        .find(|name| !name.is_empty() && !is_numeric(name))
        .map(title_case)
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_LABEL.to_string())
}

fn strip_prefix(segment: &str) -> &str {
    STRIP_PREFIXES
        .iter()
        .find_map(|prefix| segment.strip_prefix(prefix))
        .unwrap_or(segment)
}

fn is_numeric(segment: &str) -> bool {
    segment.chars().all(|c| c.is_ascii_digit())
}

/// "make-your-game" → "Make Your Game"
fn title_case(text: &str) -> String {
    text.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to `max_chars` characters, ending with `…` when cut.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(max_chars - 1).collect();
    truncated.push('…');
    truncated
}

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}
