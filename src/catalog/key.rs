//! Catalog keys of the form `"{text}-({n})"`

/// Format the catalog key for the `n`th artifact with `text`
pub fn format_key(text: &str, n: usize) -> String {
    format!("{}-({})", text, n)
}

/// Split a key into its text prefix and disambiguation index
///
/// Returns `None` if `key` does not end in a `-(n)` suffix.
pub fn split_key(key: &str) -> Option<(&str, usize)> {
    let body = key.strip_suffix(')')?;
    let open = body.rfind("-(")?;
    let digits = &body[open + 2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n = digits.parse().ok()?;
    Some((&key[..open], n))
}

/// The text prefix of a key, or the input unchanged if it carries no suffix
pub fn bare_name(key: &str) -> &str {
    split_key(key).map(|(text, _)| text).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_key() {
        assert_eq!(format_key("hello", 0), "hello-(0)");
        assert_eq!(format_key("", 3), "-(3)");
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("hello-(12)"), Some(("hello", 12)));
        assert_eq!(split_key("a-b-(0)"), Some(("a-b", 0)));
        assert_eq!(split_key("x-(0)-(1)"), Some(("x-(0)", 1)));
    }

    #[test]
    fn test_split_key_rejects_non_keys() {
        assert_eq!(split_key("hello"), None);
        assert_eq!(split_key("hello-()"), None);
        assert_eq!(split_key("hello-(x)"), None);
        assert_eq!(split_key("hello-1"), None);
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(bare_name("score-(4)"), "score");
        assert_eq!(bare_name("well-known"), "well-known");
    }
}
