/// Marker appended to text shortened by [`truncate_with_ellipsis`].
pub const ELLIPSIS: &str = "...";

/// Format an hour estimate with exactly one decimal place.
///
/// Estimates are always multiples of 0.5, so one decimal is lossless.
///
/// # Examples
///
/// ```
/// use hours_core::formatting::format_hours;
///
/// assert_eq!(format_hours(0.5), "0.5");
/// assert_eq!(format_hours(4.0), "4.0");
/// ```
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}

/// Cut `text` to at most `max_chars` characters, with no marker.
///
/// # Examples
///
/// ```
/// use hours_core::formatting::truncate_chars;
///
/// assert_eq!(truncate_chars("Refactor parser", 8), "Refactor");
/// assert_eq!(truncate_chars("short", 8), "short");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Shorten `text` to `max_chars` characters, ending in [`ELLIPSIS`], when it
/// is longer than `max_chars`. Shorter text is returned unchanged.
///
/// # Examples
///
/// ```
/// use hours_core::formatting::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("abcdefghij", 8), "abcde...");
/// assert_eq!(truncate_with_ellipsis("abcdefgh", 8), "abcdefgh");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    format!("{}{}", truncate_chars(text, keep), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours_all_estimates() {
        let formatted: Vec<String> = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0]
            .iter()
            .map(|h| format_hours(*h))
            .collect();
        assert_eq!(
            formatted,
            vec!["0.5", "1.0", "1.5", "2.0", "2.5", "3.0", "3.5", "4.0"]
        );
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("Überprüfung", 4), "Über");
        assert_eq!(truncate_chars("", 4), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_truncate_with_ellipsis_at_100() {
        let exactly = "x".repeat(100);
        assert_eq!(truncate_with_ellipsis(&exactly, 100), exactly);

        let longer = "y".repeat(101);
        let cut = truncate_with_ellipsis(&longer, 100);
        assert_eq!(cut.chars().count(), 100);
        assert!(cut.ends_with("..."));
        assert!(cut.starts_with(&"y".repeat(97)));
    }

    #[test]
    fn test_truncate_with_ellipsis_multibyte() {
        let text = "é".repeat(120);
        let cut = truncate_with_ellipsis(&text, 100);
        assert_eq!(cut.chars().count(), 100);
    }
}
