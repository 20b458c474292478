/// Characters kept by [`truncate`].
pub const TRUNCATE_CHARS: usize = 25;

/// Prefix of at most `max_chars` characters. Never splits a multi-byte
/// character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

pub fn truncate(text: &str) -> &str {
    truncate_chars(text, TRUNCATE_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_returned_as_is() {
        assert_eq!(truncate(""), "");
        assert_eq!(truncate("ok"), "ok");
        let exact = "a".repeat(25);
        assert_eq!(truncate(&exact), exact);
    }

    #[test]
    fn ascii_is_cut_to_budget() {
        let input = "abcdefghijklmnopqrstuvwxyzABCD";
        assert_eq!(input.chars().count(), 30);
        assert_eq!(truncate(input), "abcdefghijklmnopqrstuvwxy");
    }

    #[test]
    fn multibyte_characters_stay_whole() {
        let input = "日".repeat(30);
        let out = truncate(&input);
        assert_eq!(out.chars().count(), 25);
        assert_eq!(out.len(), 25 * 3);
        assert!(input.starts_with(out));
    }

    #[test]
    fn mixed_width_text() {
        let input = format!("{}{}", "é".repeat(20), "🦀".repeat(10));
        let out = truncate(&input);
        assert_eq!(out, format!("{}{}", "é".repeat(20), "🦀".repeat(5)));
    }
}
