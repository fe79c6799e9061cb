//! Canonical text for key paths resolved outside a document.

use d2_ast::{DoubleQuotedString, KeyPath, Node, StringNode, is_reserved_keyword, raw_string};
use thiserror::Error;

use crate::format;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyPathError {
    #[error("key path must have at least one segment")]
    Empty,
}

/// Render raw path segments as a dotted key that parses back to the same
/// segments, e.g. for diagnostics.
///
/// ```ignore
/// assert_eq!(format_key_path(["a.b", "c"])?, r#""a.b".c"#);
/// ```
pub fn format_key_path<S: AsRef<str>>(
    segments: impl IntoIterator<Item = S>,
) -> Result<String, KeyPathError> {
    let path: Vec<StringNode> = segments
        .into_iter()
        .map(|segment| segment_node(segment.as_ref()))
        .collect();
    if path.is_empty() {
        return Err(KeyPathError::Empty);
    }
    Ok(format(&Node::KeyPath(KeyPath::new(path))))
}

fn segment_node(segment: &str) -> StringNode {
    // Unquoted keywords are lowercased on output; quote any other spelling so
    // the segment survives as written.
    if is_reserved_keyword(segment) && segment.bytes().any(|b| b.is_ascii_uppercase()) {
        return StringNode::DoubleQuoted(DoubleQuotedString::flat(segment));
    }
    raw_string(segment, true)
}
