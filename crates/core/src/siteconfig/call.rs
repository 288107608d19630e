//! Parser for the `prefix(key): value` call form.
//!
//! Used by `replace_string(...)` and `http_header(...)` lines. The key ends at
//! the first close paren that is not preceded by a backslash, and that paren
//! must be followed directly by a colon. Everything after the colon is the
//! value, untouched.

/// A parsed `prefix(key): value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub key: String,
    /// Raw text after the colon, leading whitespace included
    pub value: String,
}

/// Parse `line` as a call of `prefix`.
///
/// Returns `None` when the line does not start with `prefix(`, when no
/// unescaped `)` is found, or when that `)` is not immediately followed by
/// `:`. The parser commits to the first unescaped `)` and never backtracks.
///
/// `\)` inside the key is an escaped paren: the backslash is dropped and the
/// paren kept.
///
/// ```rust
/// use siteconf_core::siteconfig::call::parse_call;
///
/// let call = parse_call("http_header", "http_header(user-agent): PHP/5.3").unwrap();
/// assert_eq!(call.key, "user-agent");
/// assert_eq!(call.value, " PHP/5.3");
///
/// assert!(parse_call("http_header", "http_header(user)-agent): PHP/5.3").is_none());
/// ```
pub fn parse_call(prefix: &str, line: &str) -> Option<Call> {
    let rest = line.strip_prefix(prefix)?.strip_prefix('(')?;

    let mut key = String::new();
    let mut last = None;
    let mut chars = rest.char_indices().peekable();
    let mut end = None;

    while let Some((idx, ch)) = chars.next() {
        if ch == ')' && last != Some('\\') {
            end = Some(idx);
            break;
        }

        let escapes_paren = ch == '\\' && matches!(chars.peek(), Some((_, ')')));
        if !escapes_paren {
            key.push(ch);
        }
        last = Some(ch);
    }

    let after_paren = &rest[end? + 1..];
    let value = after_paren.strip_prefix(':')?;

    Some(Call { key, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::markup_key("replace_string", r#"replace_string(<span class="description">): <em>"#, r#"<span class="description">"#, " <em>")]
    #[case::cdata_key("replace_string", "replace_string(<![CDATA[): _", "<![CDATA[", " _")]
    #[case::header("http_header", "http_header(user-agent): PHP/5.3", "user-agent", " PHP/5.3")]
    #[case::escaped_paren("http_header", r"http_header(good-\)paren): PHP/5.3", "good-)paren", " PHP/5.3")]
    #[case::colon_in_key("replace_string", "replace_string(a:b): c", "a:b", " c")]
    #[case::value_untrimmed("http_header", "http_header(x):   spaced  ", "x", "   spaced  ")]
    #[case::empty_value("http_header", "http_header(x):", "x", "")]
    #[case::empty_key("http_header", "http_header(): v", "", " v")]
    #[case::value_with_parens("http_header", "http_header(User-Agent): Mozilla/5.0 (compatible)", "User-Agent", " Mozilla/5.0 (compatible)")]
    fn test_parse_call_matches(#[case] prefix: &str, #[case] line: &str, #[case] key: &str, #[case] value: &str) {
        let call = parse_call(prefix, line).unwrap();
        assert_eq!(call.key, key);
        assert_eq!(call.value, value);
    }

    #[rstest]
    #[case::stray_paren("http_header", "http_header(user)-agent): PHP/5.3")]
    #[case::space_before_colon("http_header", "http_header(bad colon) : PHP/5.3")]
    #[case::no_terminator("http_header", "http_header(user-agent: PHP/5.3")]
    #[case::only_escaped_paren("http_header", r"http_header(user\): PHP/5.3")]
    #[case::no_colon("http_header", "http_header(user-agent)")]
    #[case::wrong_prefix("replace_string", "http_header(user-agent): PHP/5.3")]
    #[case::prefix_without_paren("http_header", "http_header: PHP/5.3")]
    #[case::space_before_paren("http_header", "http_header (user-agent): PHP/5.3")]
    fn test_parse_call_no_match(#[case] prefix: &str, #[case] line: &str) {
        assert_eq!(parse_call(prefix, line), None);
    }

    /// Older configs used `/)` as the escape. Only `\)` escapes now, so the
    /// slash form hits an unescaped `)` followed by `p` and is rejected.
    #[test]
    fn test_slash_is_not_an_escape() {
        assert_eq!(parse_call("http_header", "http_header(good-/)paren): PHP/5.3"), None);
    }

    #[test]
    fn test_double_backslash_keeps_one() {
        let call = parse_call("replace_string", r"replace_string(a\\)b): c").unwrap();
        assert_eq!(call.key, r"a\)b");
        assert_eq!(call.value, " c");
    }

    #[test]
    fn test_backslash_not_before_paren_is_kept() {
        let call = parse_call("replace_string", r"replace_string(a\nb): c").unwrap();
        assert_eq!(call.key, r"a\nb");
    }

    #[test]
    fn test_multibyte_key() {
        let call = parse_call("replace_string", "replace_string(«café»): ☕").unwrap();
        assert_eq!(call.key, "«café»");
        assert_eq!(call.value, " ☕");
    }
}
