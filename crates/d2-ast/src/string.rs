//! String scalars in their four quoting styles.
//!
//! Unquoted and double-quoted strings may interpolate variables (`${a.b}`),
//! so their value is a sequence of [`InterpolationBox`]es rather than a plain
//! `String`.

use std::borrow::Cow;

use crate::keyword::{is_unquoted_key_special, is_unquoted_value_special};
use crate::node::Substitution;
use crate::range::Range;

/// One piece of an interpolating string.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationBox {
    /// Literal text, unescaped.
    Text(String),
    /// A `${path}` reference.
    Substitution(Substitution),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnquotedString {
    pub value: Vec<InterpolationBox>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoubleQuotedString {
    pub value: Vec<InterpolationBox>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SingleQuotedString {
    pub value: String,
    pub range: Range,
}

/// A `|`-fenced literal block, e.g. `|md # Title|`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockString {
    pub value: String,
    /// Short language hint printed right after the opening fence (`md`, `go`, …).
    pub tag: String,
    /// Fence characters written between the pipe and the content; may be empty.
    pub quote: String,
    pub range: Range,
}

/// Any string scalar that can appear as a key path segment or a value.
#[derive(Debug, Clone, PartialEq)]
pub enum StringNode {
    Unquoted(UnquotedString),
    DoubleQuoted(DoubleQuotedString),
    SingleQuoted(SingleQuotedString),
    Block(BlockString),
}

fn boxes_to_string(boxes: &[InterpolationBox]) -> Cow<'_, str> {
    match boxes {
        [] => Cow::Borrowed(""),
        [InterpolationBox::Text(s)] => Cow::Borrowed(s.as_str()),
        _ => {
            let mut out = String::new();
            for b in boxes {
                match b {
                    InterpolationBox::Text(s) => out.push_str(s),
                    InterpolationBox::Substitution(sub) => {
                        out.push_str("${");
                        out.push_str(&sub.path.to_string());
                        out.push('}');
                    }
                }
            }
            Cow::Owned(out)
        }
    }
}

impl UnquotedString {
    /// An unquoted string with no interpolations.
    pub fn flat(s: impl Into<String>) -> Self {
        Self {
            value: vec![InterpolationBox::Text(s.into())],
            range: Range::UNSET,
        }
    }

    pub fn scalar_string(&self) -> Cow<'_, str> {
        boxes_to_string(&self.value)
    }
}

impl DoubleQuotedString {
    /// A double-quoted string with no interpolations.
    pub fn flat(s: impl Into<String>) -> Self {
        Self {
            value: vec![InterpolationBox::Text(s.into())],
            range: Range::UNSET,
        }
    }

    pub fn scalar_string(&self) -> Cow<'_, str> {
        boxes_to_string(&self.value)
    }
}

impl SingleQuotedString {
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            value: s.into(),
            range: Range::UNSET,
        }
    }
}

impl BlockString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = quote.into();
        self
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }
}

impl StringNode {
    /// The string's value with escapes resolved and interpolations shown as `${…}`.
    pub fn scalar_string(&self) -> Cow<'_, str> {
        match self {
            StringNode::Unquoted(s) => s.scalar_string(),
            StringNode::DoubleQuoted(s) => s.scalar_string(),
            StringNode::SingleQuoted(s) => Cow::Borrowed(s.value.as_str()),
            StringNode::Block(s) => Cow::Borrowed(s.value.as_str()),
        }
    }

    pub fn range(&self) -> Range {
        match self {
            StringNode::Unquoted(s) => s.range,
            StringNode::DoubleQuoted(s) => s.range,
            StringNode::SingleQuoted(s) => s.range,
            StringNode::Block(s) => s.range,
        }
    }
}

impl From<&str> for StringNode {
    fn from(s: &str) -> Self {
        StringNode::Unquoted(UnquotedString::flat(s))
    }
}

fn needs_quoting_in_key(s: &str) -> bool {
    let mut chars = s.chars().peekable();
    let mut first = true;
    while let Some(c) = chars.next() {
        let special = match c {
            '-' => chars.peek() == Some(&'-'),
            '&' => first,
            c => is_unquoted_key_special(c),
        };
        if special {
            return true;
        }
        first = false;
    }
    false
}

/// Wraps arbitrary text in the least intrusive quoting style that keeps it a
/// single scalar.
///
/// Text that an unquoted token could not hold verbatim is double-quoted, or
/// single-quoted when it contains `"` (and no newline, which single quotes
/// cannot carry).
pub fn raw_string(s: &str, in_key: bool) -> StringNode {
    if s.is_empty() {
        return StringNode::DoubleQuoted(DoubleQuotedString::flat(s));
    }
    let special = if in_key {
        needs_quoting_in_key(s)
    } else {
        s.eq_ignore_ascii_case("null") || s.chars().any(is_unquoted_value_special)
    };
    if special || s.trim() != s {
        if !s.contains('"') || s.contains('\n') {
            StringNode::DoubleQuoted(DoubleQuotedString::flat(s))
        } else {
            StringNode::SingleQuoted(SingleQuotedString::new(s))
        }
    } else {
        StringNode::Unquoted(UnquotedString::flat(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_string_plain() {
        assert_eq!(
            raw_string("server", true),
            StringNode::Unquoted(UnquotedString::flat("server"))
        );
        assert_eq!(
            raw_string("a-b", true),
            StringNode::Unquoted(UnquotedString::flat("a-b"))
        );
    }

    #[test]
    fn test_raw_string_quotes_specials() {
        assert_eq!(
            raw_string("a.b", true),
            StringNode::DoubleQuoted(DoubleQuotedString::flat("a.b"))
        );
        assert_eq!(
            raw_string("a--b", true),
            StringNode::DoubleQuoted(DoubleQuotedString::flat("a--b"))
        );
        assert_eq!(
            raw_string("say \"hi\";", false),
            StringNode::SingleQuoted(SingleQuotedString::new("say \"hi\";"))
        );
    }

    #[test]
    fn test_raw_string_empty_and_whitespace() {
        assert_eq!(
            raw_string("", false),
            StringNode::DoubleQuoted(DoubleQuotedString::flat(""))
        );
        assert_eq!(
            raw_string(" padded", true),
            StringNode::DoubleQuoted(DoubleQuotedString::flat(" padded"))
        );
    }

    #[test]
    fn test_raw_string_null_value() {
        assert_eq!(
            raw_string("NULL", false),
            StringNode::DoubleQuoted(DoubleQuotedString::flat("NULL"))
        );
    }

    #[test]
    fn test_ampersand_only_special_at_start() {
        assert_eq!(
            raw_string("a&b", true),
            StringNode::Unquoted(UnquotedString::flat("a&b"))
        );
        assert!(matches!(raw_string("&a", true), StringNode::DoubleQuoted(_)));
    }
}
