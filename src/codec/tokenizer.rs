//! Primitive field splitting.
//!
//! Delimiters are never escaped. A delimiter inside free text (review text,
//! note names) splits that text; callers live with it rather than the
//! tokenizer guessing.

/// Separates items (accord groups, note entries, id lists).
pub const ITEM_SEP: char = ';';
/// Separates tokens inside a colon-shaped item (`id:pct`, `category:votes:percent`).
pub const TOKEN_SEP: char = ':';
/// Separates tokens inside a parenthesised entry (`name,id,image`).
pub const ENTRY_SEP: char = ',';

/// Splits `raw` on `delimiter`, keeping empty tokens in position.
///
/// An empty input yields an empty sequence rather than one empty token.
pub fn split(raw: &str, delimiter: char) -> Vec<&str> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(delimiter).collect()
}

/// Item-level split that drops blank items, so `"a:1;;b:2;"` has two items.
pub fn split_items(raw: &str, delimiter: char) -> impl Iterator<Item = &str> {
    raw.split(delimiter).filter(|item| !item.trim().is_empty())
}

/// Number of tokens `item` splits into.
pub fn token_count(item: &str, delimiter: char) -> usize {
    if item.is_empty() {
        0
    } else {
        item.matches(delimiter).count() + 1
    }
}

/// Trimmed token, or `None` when blank.
pub fn non_blank(token: &str) -> Option<String> {
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_empty() {
        assert!(split("", ITEM_SEP).is_empty());
    }

    #[test]
    fn test_split_keeps_blank_tokens() {
        assert_eq!(split("a,,c", ENTRY_SEP), vec!["a", "", "c"]);
        assert_eq!(split("a24:", TOKEN_SEP), vec!["a24", ""]);
    }

    #[test]
    fn test_split_items_drops_blank_items() {
        let items: Vec<&str> = split_items("a:1;; ;b:2;", ITEM_SEP).collect();
        assert_eq!(items, vec!["a:1", "b:2"]);
    }

    #[test]
    fn test_token_count() {
        assert_eq!(token_count("", TOKEN_SEP), 0);
        assert_eq!(token_count("a24", TOKEN_SEP), 1);
        assert_eq!(token_count("woody:100:#fff:#000", TOKEN_SEP), 4);
        assert_eq!(token_count(":", TOKEN_SEP), 2);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" n1 "), Some("n1".to_string()));
    }
}
