//! String utilities for the domain layer.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe)
///
/// Used for log previews of raw model output.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Render items as a comma-separated list of double-quoted strings.
///
/// `["Instagram", "LinkedIn"]` becomes `"Instagram", "LinkedIn"`.
pub fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("\"{}\"", item.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("pitch", 10), "pitch");
        assert_eq!(truncate("pitch deck ready", 8), "pitch...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // '₹' is 3 bytes
        assert_eq!(truncate("₹₹₹₹", 12), "₹₹₹₹");
        assert_eq!(truncate("₹₹₹₹₹", 10), "₹₹...");
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(
            quoted_list(&["Instagram", "YouTube Shorts"]),
            "\"Instagram\", \"YouTube Shorts\""
        );
        assert_eq!(quoted_list::<&str>(&[]), "");
    }
}
