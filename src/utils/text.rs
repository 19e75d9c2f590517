const ELLIPSIS: &str = "...";

/// Truncate text to `max_chars` characters, appending an ellipsis when cut.
///
/// Counts `char`s rather than bytes so multi-byte names never split mid-codepoint.
///
/// # Examples
/// ```
/// use gmp_audit::utils::text::truncate_chars;
/// assert_eq!(truncate_chars("Hello World!", 5), "Hello...");
/// assert_eq!(truncate_chars("Hi", 5), "Hi");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Shorten text only when it is longer than `threshold` characters,
/// keeping the first `keep` characters.
pub fn shorten_if_longer(text: &str, threshold: usize, keep: usize) -> String {
    if text.chars().count() > threshold {
        truncate_chars(text, keep)
    } else {
        text.to_string()
    }
}

/// Repeat a single character, used for section rules in text output
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat_n(ch, width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactly", 7), "exactly");
        assert_eq!(truncate_chars("this is a long text", 7), "this is...");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語...");
    }

    #[test]
    fn test_shorten_if_longer() {
        let long = "x".repeat(101);
        assert_eq!(shorten_if_longer(&long, 100, 20), format!("{}...", "x".repeat(20)));

        let exact = "y".repeat(100);
        assert_eq!(shorten_if_longer(&exact, 100, 20), exact);
    }

    #[test]
    fn test_rule() {
        assert_eq!(rule('=', 4), "====");
        assert_eq!(rule('-', 0), "");
    }
}
