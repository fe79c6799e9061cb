//! Reserved words and special characters of the D2 surface syntax.

use std::sync::LazyLock;

use ahash::AHashSet;

/// Characters that terminate or change the meaning of an unquoted key.
///
/// Quotes, `|`, `-` and `&` are only significant in certain positions; callers
/// check those before consulting this set.
pub const UNQUOTED_KEY_SPECIALS: &str = "#;\n\\{}[]'\"|:.-<>*&()@";

/// Characters that terminate or change the meaning of an unquoted value.
pub const UNQUOTED_VALUE_SPECIALS: &str = "#;\n\\{}[]'\"|$@";

const RESERVED_KEYWORDS: &[&str] = &[
    "label",
    "shape",
    "icon",
    "constraint",
    "tooltip",
    "link",
    "near",
    "width",
    "height",
    "top",
    "left",
    "direction",
    "class",
    "classes",
    "vars",
    "style",
    "grid-rows",
    "grid-columns",
    "grid-gap",
    "vertical-gap",
    "horizontal-gap",
    "source-arrowhead",
    "target-arrowhead",
    "layers",
    "scenarios",
    "steps",
    "opacity",
    "stroke",
    "fill",
    "fill-pattern",
    "stroke-width",
    "stroke-dash",
    "border-radius",
    "font",
    "font-size",
    "font-color",
    "bold",
    "italic",
    "underline",
    "text-transform",
    "shadow",
    "multiple",
    "double-border",
    "3d",
    "animated",
    "filled",
];

static RESERVED: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| RESERVED_KEYWORDS.iter().copied().collect());

/// Returns true if `s` is a reserved keyword, ignoring ASCII case.
pub fn is_reserved_keyword(s: &str) -> bool {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        RESERVED.contains(s.to_ascii_lowercase().as_str())
    } else {
        RESERVED.contains(s)
    }
}

pub fn is_unquoted_key_special(c: char) -> bool {
    UNQUOTED_KEY_SPECIALS.contains(c)
}

pub fn is_unquoted_value_special(c: char) -> bool {
    UNQUOTED_VALUE_SPECIALS.contains(c)
}
