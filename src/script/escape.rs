//! Escaping for text inlined into single-quoted script literals.

use std::borrow::Cow;

/// Escape single quotes and newlines so `s` can sit inside `'...'`.
///
/// This is the whole rule: backslashes and `</script>` pass through
/// unchanged.
///
/// # Example
/// ```ignore
/// assert_eq!(single_quoted("a'b\nc"), "a\\'b\\nc");
/// assert_eq!(single_quoted("plain"), "plain"); // No allocation
/// ```
pub fn single_quoted(s: &str) -> Cow<'_, str> {
    if !s.contains(['\'', '\n']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\'' => result.push_str("\\'"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes_and_newlines() {
        assert_eq!(
            single_quoted("body {\n  font-family: 'Inter';\n}"),
            "body {\\n  font-family: \\'Inter\\';\\n}"
        );
    }

    #[test]
    fn test_escape_borrows_when_clean() {
        assert!(matches!(single_quoted("a.css"), Cow::Borrowed("a.css")));
    }

    #[test]
    fn test_escape_leaves_backslash() {
        assert_eq!(single_quoted("content: '\\2014'"), "content: \\'\\2014\\'");
    }
}
