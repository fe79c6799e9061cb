//! Minimal escaping for the three inline string forms.
//!
//! A character is escaped only when leaving it bare would change how the
//! token parses. Every function here is total over arbitrary input.

use d2_ast::keyword::{is_unquoted_key_special, is_unquoted_value_special};

/// Escape text for use between single quotes.
///
/// Single-quoted strings have no escape character: the quote is doubled and
/// newlines are written as `\n`.
pub fn escape_single_quoted(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\'' => result.push_str("''"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape text for use between double quotes.
///
/// `$` starts an interpolation in values and is escaped there. Keys never
/// interpolate, so `$` passes through in key context.
pub fn escape_double_quoted(s: &str, in_key: bool) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '$' if !in_key => result.push_str("\\$"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape text so it reads back as a single unquoted token.
///
/// The empty string has no unquoted spelling and becomes `""`. Text equal to
/// `null` (any case) would read back as the null literal, so it gets a leading
/// backslash.
pub fn escape_unquoted(s: &str, in_key: bool) -> String {
    if s.is_empty() {
        return r#""""#.to_string();
    }
    if s.eq_ignore_ascii_case("null") {
        return format!("\\{s}");
    }
    escape_unquoted_piece(s, in_key, true)
}

/// Escape one text piece of an unquoted token that may also hold
/// substitutions.
///
/// `at_start` is false once anything (text or a substitution) has been
/// written for the token, and then the rules for the first character no
/// longer apply. The empty and `null` rules concern the whole token and are
/// left to [`escape_unquoted`].
pub fn escape_unquoted_piece(s: &str, in_key: bool, at_start: bool) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let mut first = at_start;
    while let Some(c) = chars.next() {
        let escape = match c {
            '"' | '\'' | '|' => first,
            '\n' => {
                result.push_str("\\n");
                first = false;
                continue;
            }
            '-' if in_key => chars.peek() == Some(&'-'),
            '&' if in_key => first,
            c if in_key => is_unquoted_key_special(c),
            c => is_unquoted_value_special(c),
        };
        if escape {
            result.push('\\');
        }
        result.push(c);
        first = false;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quoted() {
        assert_eq!(escape_single_quoted("it's"), "it''s");
        assert_eq!(escape_single_quoted("a\nb"), "a\\nb");
        assert_eq!(escape_single_quoted(r#"back\slash "and" $x"#), r#"back\slash "and" $x"#);
        assert_eq!(escape_single_quoted(""), "");
    }

    #[test]
    fn test_double_quoted() {
        assert_eq!(escape_double_quoted(r#"say "hi""#, false), r#"say \"hi\""#);
        assert_eq!(escape_double_quoted(r"C:\dir", false), r"C:\\dir");
        assert_eq!(escape_double_quoted("two\nlines", false), "two\\nlines");
        assert_eq!(escape_double_quoted("it's", false), "it's");
    }

    #[test]
    fn test_double_quoted_dollar_depends_on_context() {
        assert_eq!(escape_double_quoted("cost: $5", false), "cost: \\$5");
        assert_eq!(escape_double_quoted("cost: $5", true), "cost: $5");
    }

    #[test]
    fn test_unquoted_plain_text_untouched() {
        assert_eq!(escape_unquoted("hello world", false), "hello world");
        assert_eq!(escape_unquoted("hello world", true), "hello world");
        assert_eq!(escape_unquoted("a-b_c", true), "a-b_c");
    }

    #[test]
    fn test_unquoted_empty_and_null() {
        assert_eq!(escape_unquoted("", false), r#""""#);
        assert_eq!(escape_unquoted("", true), r#""""#);
        assert_eq!(escape_unquoted("null", false), r"\null");
        assert_eq!(escape_unquoted("NuLL", true), r"\NuLL");
        assert_eq!(escape_unquoted("nullable", false), "nullable");
    }

    #[test]
    fn test_unquoted_leading_quotes_and_pipe() {
        assert_eq!(escape_unquoted("'quoted", false), r"\'quoted");
        assert_eq!(escape_unquoted("\"quoted", true), "\\\"quoted");
        assert_eq!(escape_unquoted("|pipe", false), r"\|pipe");
    }

    #[test]
    fn test_unquoted_mid_token_quotes_and_pipe() {
        assert_eq!(escape_unquoted("it's", false), "it's");
        assert_eq!(escape_unquoted("a|b", true), "a|b");
        assert_eq!(escape_unquoted("6\"", false), "6\"");
    }

    #[test]
    fn test_unquoted_newline() {
        assert_eq!(escape_unquoted("a\nb", false), r"a\nb");
        assert_eq!(escape_unquoted("a\nb", true), r"a\nb");
    }

    #[test]
    fn test_unquoted_key_hyphens() {
        assert_eq!(escape_unquoted("a--b", true), r"a\--b");
        assert_eq!(escape_unquoted("a-b", true), "a-b");
        assert_eq!(escape_unquoted("a->b", true), r"a-\>b");
        assert_eq!(escape_unquoted("a--b", false), "a--b");
    }

    #[test]
    fn test_unquoted_key_ampersand() {
        assert_eq!(escape_unquoted("&a", true), r"\&a");
        assert_eq!(escape_unquoted("a&b", true), "a&b");
        assert_eq!(escape_unquoted("&a", false), "&a");
    }

    #[test]
    fn test_unquoted_key_specials() {
        assert_eq!(escape_unquoted("a.b", true), r"a\.b");
        assert_eq!(escape_unquoted("a:b", true), r"a\:b");
        assert_eq!(escape_unquoted("f(x)", true), r"f\(x\)");
        assert_eq!(escape_unquoted("a*", true), r"a\*");
        assert_eq!(escape_unquoted("$price", true), "$price");
    }

    #[test]
    fn test_unquoted_value_specials() {
        assert_eq!(escape_unquoted("a;b", false), r"a\;b");
        assert_eq!(escape_unquoted("#1", false), r"\#1");
        assert_eq!(escape_unquoted("{x}", false), r"\{x\}");
        assert_eq!(escape_unquoted("$5", false), r"\$5");
        assert_eq!(escape_unquoted(r"a\b", false), r"a\\b");
        assert_eq!(escape_unquoted("a.b:c", false), "a.b:c");
    }

    #[test]
    fn test_unquoted_piece_mid_token() {
        assert_eq!(escape_unquoted_piece("'a", false, false), "'a");
        assert_eq!(escape_unquoted_piece("'a", false, true), r"\'a");
        assert_eq!(escape_unquoted_piece("|x", false, false), "|x");
        assert_eq!(escape_unquoted_piece("null", false, false), "null");
        assert_eq!(escape_unquoted_piece("&b", true, false), "&b");
        assert_eq!(escape_unquoted_piece("a#b", false, false), r"a\#b");
    }
}
