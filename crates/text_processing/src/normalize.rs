//! Whitespace normalization

/// Collapse every whitespace run to a single space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Substring check with both sides whitespace-normalized
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize_whitespace(haystack).contains(&normalize_whitespace(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\t b\n\nc  "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_contains_normalized() {
        let transcript = "Operator: Sizə   50% endirim\nedəcəyik.";
        assert!(contains_normalized(transcript, "50% endirim edəcəyik."));
        assert!(!contains_normalized(transcript, "60% endirim"));
    }
}
