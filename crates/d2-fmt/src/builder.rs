//! Syntax tree to Doc IR builder.
//!
//! One builder is created per formatting call. It carries the only mutable
//! state of a call: whether the text being built belongs to a key (which
//! changes the escaping rules for strings).

use d2_ast::{
    Array, BlockComment, Comment, DoubleQuotedString, Edge, EdgeIndex, Import, InterpolationBox,
    Key, KeyMarker, KeyPath, Map, Node, Scalar, SingleQuotedString, StringNode, Substitution,
    UnquotedString, Value, is_reserved_keyword,
};

use crate::block::build_block_string;
use crate::board::{BoardOrganizer, Placement};
use crate::doc::{Doc, DocBuilder};
use crate::escape::{
    escape_double_quoted, escape_single_quoted, escape_unquoted, escape_unquoted_piece,
};

const BLOCK_COMMENT_FENCE: &str = "\"\"\"";

/// Builds the Doc IR for a syntax tree.
#[derive(Debug, Default)]
pub struct FormatBuilder {
    in_key: bool,
}

/// The entries of a map or array laid out in sequence.
struct Sequence {
    parts: DocBuilder,
    printed: usize,
}

impl FormatBuilder {
    /// Create a new format builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the Doc IR for `node` and everything below it.
    pub fn build(mut self, node: &Node) -> Doc {
        self.build_node(node)
    }

    fn in_key_context<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let outer = std::mem::replace(&mut self.in_key, true);
        let result = f(self);
        self.in_key = outer;
        result
    }

    fn build_node(&mut self, node: &Node) -> Doc {
        match node {
            Node::LineComment(comment) => build_comment(comment),
            Node::BlockComment(comment) => build_block_comment(comment),
            Node::Null(_) => Doc::text("null"),
            Node::Suspension(s) => build_suspension(s.value),
            Node::Boolean(b) => build_boolean(b.value),
            Node::Number(n) => Doc::text(n.raw.as_str()),
            Node::UnquotedString(s) => self.build_unquoted(s),
            Node::DoubleQuotedString(s) => self.build_double_quoted(s),
            Node::SingleQuotedString(s) => build_single_quoted(s),
            Node::BlockString(s) => build_block_string(s),
            Node::Substitution(s) => self.build_substitution(s),
            Node::Import(i) => self.build_import(i),
            Node::Array(array) => self.build_array(array),
            Node::Map(map) => self.build_map(map),
            Node::Key(key) => self.build_key(key),
            Node::KeyPath(path) => self.build_key_path(path),
            Node::Edge(edge) => self.build_edge(edge),
            Node::EdgeIndex(index) => build_edge_index(index),
        }
    }

    fn build_scalar(&mut self, scalar: &Scalar) -> Doc {
        match scalar {
            Scalar::Null(_) => Doc::text("null"),
            Scalar::Suspension(s) => build_suspension(s.value),
            Scalar::Boolean(b) => build_boolean(b.value),
            Scalar::Number(n) => Doc::text(n.raw.as_str()),
            Scalar::UnquotedString(s) => self.build_unquoted(s),
            Scalar::DoubleQuotedString(s) => self.build_double_quoted(s),
            Scalar::SingleQuotedString(s) => build_single_quoted(s),
            Scalar::BlockString(s) => build_block_string(s),
        }
    }

    fn build_value(&mut self, value: &Value) -> Doc {
        match value {
            Value::Scalar(scalar) => self.build_scalar(scalar),
            Value::Import(import) => self.build_import(import),
            Value::Array(array) => self.build_array(array),
            Value::Map(map) => self.build_map(map),
        }
    }

    fn build_string(&mut self, s: &StringNode) -> Doc {
        match s {
            StringNode::Unquoted(s) => self.build_unquoted(s),
            StringNode::DoubleQuoted(s) => self.build_double_quoted(s),
            StringNode::SingleQuoted(s) => build_single_quoted(s),
            StringNode::Block(s) => build_block_string(s),
        }
    }

    fn build_unquoted(&mut self, s: &UnquotedString) -> Doc {
        match s.value.as_slice() {
            [InterpolationBox::Text(text)] if is_reserved_keyword(text) => {
                Doc::text(escape_unquoted(&text.to_ascii_lowercase(), self.in_key))
            }
            [InterpolationBox::Text(text)] => Doc::text(escape_unquoted(text, self.in_key)),
            boxes
                if boxes
                    .iter()
                    .all(|b| matches!(b, InterpolationBox::Text(text) if text.is_empty())) =>
            {
                Doc::text(escape_unquoted("", self.in_key))
            }
            boxes => self.build_interpolation(boxes, escape_unquoted_piece),
        }
    }

    fn build_double_quoted(&mut self, s: &DoubleQuotedString) -> Doc {
        Doc::surround(
            Doc::text("\""),
            self.build_interpolation(&s.value, |text, in_key, _| {
                escape_double_quoted(text, in_key)
            }),
            Doc::text("\""),
        )
    }

    /// `escape` receives each text piece, the key context, and whether the
    /// piece opens the token.
    fn build_interpolation(
        &mut self,
        boxes: &[InterpolationBox],
        escape: fn(&str, bool, bool) -> String,
    ) -> Doc {
        let mut doc = DocBuilder::new();
        let mut at_start = true;
        for b in boxes {
            match b {
                InterpolationBox::Text(text) if text.is_empty() => {}
                InterpolationBox::Text(text) => {
                    doc.text(escape(text, self.in_key, at_start));
                    at_start = false;
                }
                InterpolationBox::Substitution(sub) => {
                    doc.push(self.build_substitution(sub));
                    at_start = false;
                }
            }
        }
        doc.build()
    }

    fn build_substitution(&mut self, sub: &Substitution) -> Doc {
        let mut doc = DocBuilder::new();
        if sub.spread {
            doc.text("...");
        }
        doc.text("${")
            .push(self.build_key_path(&sub.path))
            .text("}");
        doc.build()
    }

    fn build_import(&mut self, import: &Import) -> Doc {
        let mut doc = DocBuilder::new();
        if import.spread {
            doc.text("...");
        }
        doc.text("@")
            .text(import.pre.as_str())
            .push(self.build_key_path(&import.path));
        doc.build()
    }

    fn build_key_path(&mut self, path: &KeyPath) -> Doc {
        self.in_key_context(|b| {
            Doc::join(
                path.path.iter().map(|segment| b.build_string(segment)),
                Doc::text("."),
            )
        })
    }

    fn build_key(&mut self, key: &Key) -> Doc {
        let mut doc = DocBuilder::new();
        match key.marker {
            Some(KeyMarker::Declare) => {
                doc.text("&");
            }
            Some(KeyMarker::NegateDeclare) => {
                doc.text("!&");
            }
            None => {}
        }
        if let Some(path) = &key.key {
            doc.push(self.build_key_path(path));
        }
        if !key.edges.is_empty() {
            // A bare chain `a -> b` needs no parentheses; a scoped or indexed
            // one does: `x.(a -> b)[0].style`.
            let scoped = key.key.is_some() || key.edge_index.is_some() || key.edge_key.is_some();
            if key.key.is_some() {
                doc.text(".");
            }
            if scoped {
                doc.text("(");
            }
            doc.push(self.build_edge_chain(&key.edges));
            if scoped {
                doc.text(")");
            }
        }
        if let Some(index) = &key.edge_index {
            doc.push(build_edge_index(index));
        }
        if let Some(edge_key) = &key.edge_key {
            if !doc.is_empty() {
                doc.text(".");
            }
            doc.push(self.build_key_path(edge_key));
        }
        if let Some(primary) = &key.primary {
            doc.text(": ").push(self.build_scalar(primary));
        }
        match &key.value {
            Some(value) if value.as_map().is_some_and(|map| map.nodes.is_empty()) => {}
            Some(value) => {
                doc.text(if key.primary.is_some() { " " } else { ": " })
                    .push(self.build_value(value));
            }
            None => {}
        }
        doc.build()
    }

    fn build_edge_chain(&mut self, edges: &[Edge]) -> Doc {
        let mut doc = DocBuilder::new();
        if let Some(src) = edges.first().and_then(|edge| edge.src.as_ref()) {
            doc.push(self.build_key_path(src)).text(" ");
        }
        for (i, edge) in edges.iter().enumerate() {
            if i > 0 {
                doc.text(" ");
            }
            doc.push(self.build_arrow_and_dst(edge));
        }
        doc.build()
    }

    fn build_edge(&mut self, edge: &Edge) -> Doc {
        let mut doc = DocBuilder::new();
        if let Some(src) = &edge.src {
            doc.push(self.build_key_path(src)).text(" ");
        }
        doc.push(self.build_arrow_and_dst(edge));
        doc.build()
    }

    fn build_arrow_and_dst(&mut self, edge: &Edge) -> Doc {
        let mut doc = DocBuilder::new();
        doc.text(arrow(edge));
        if let Some(dst) = &edge.dst {
            doc.text(" ").push(self.build_key_path(dst));
        }
        doc.build()
    }

    /// Lay out a run of entries.
    ///
    /// One-line runs are joined with `"; "`. Otherwise each entry starts a new
    /// line (the first only if `leading_break`), a blank line is kept where
    /// the source had one, and a comment that followed an entry on the same
    /// source line stays on that line. `place` decides which entries are
    /// printed here; a moved entry takes its trailing comment with it.
    fn build_sequence<'a>(
        &mut self,
        nodes: &'a [Node],
        one_line: bool,
        leading_break: bool,
        mut place: impl FnMut(&'a Node, Option<&'a Node>) -> Placement,
    ) -> Sequence {
        let mut parts = DocBuilder::new();
        let mut printed = 0;
        let mut prev_end: Option<u32> = None;
        let mut i = 0;

        while i < nodes.len() {
            let node = &nodes[i];
            i += 1;
            let range = node.range();
            let trailing = nodes
                .get(i)
                .filter(|next| !one_line && next.is_comment())
                .filter(|next| next.range().start.line == range.end.line);

            match place(node, trailing) {
                Placement::InPlace => {}
                Placement::Moved => {
                    prev_end = Some(trailing.map_or(range.end.line, |c| c.range().end.line));
                    if trailing.is_some() {
                        i += 1;
                    }
                    continue;
                }
                Placement::Dropped => {
                    prev_end = Some(range.end.line);
                    continue;
                }
            }

            if one_line {
                if printed > 0 {
                    parts.text("; ");
                }
            } else {
                if printed > 0
                    && let Some(end) = prev_end
                    && range.start.line.saturating_sub(end) > 1
                {
                    parts.bare_line();
                }
                if printed > 0 || leading_break {
                    parts.hardline();
                }
            }
            parts.push(self.build_node(node));

            let mut end = range.end.line;
            if let Some(comment) = trailing {
                parts.text(" ").push(self.build_node(comment));
                end = comment.range().end.line;
                i += 1;
            }
            prev_end = Some(end);
            printed += 1;
        }

        Sequence { parts, printed }
    }

    fn build_map(&mut self, map: &Map) -> Doc {
        // The file scope always gets one entry per line.
        let one_line = !map.is_file && map.range.is_one_line();
        let mut boards = BoardOrganizer::new();
        let Sequence { mut parts, printed } =
            self.build_sequence(&map.nodes.0, one_line, !map.is_file, |node, trailing| {
                boards.place(node, trailing)
            });

        for (i, board) in boards.into_ordered().enumerate() {
            let first = printed == 0 && i == 0;
            if one_line {
                if !first {
                    parts.text("; ");
                }
            } else if !(first && map.is_file) {
                // Only a board opening the whole output goes without a blank line.
                parts.bare_line().hardline();
            }
            parts.push(self.build_key(board.key));
            if let Some(comment) = board.trailing {
                parts.text(" ").push(self.build_node(comment));
            }
        }

        if map.is_file {
            if parts.is_empty() {
                return Doc::Nil;
            }
            return parts.build().concat(Doc::hardline());
        }
        if parts.is_empty() {
            return Doc::text("{}");
        }
        if one_line {
            Doc::surround(Doc::text("{ "), parts.build(), Doc::text(" }"))
        } else {
            Doc::surround(
                Doc::text("{"),
                parts.build_indent(),
                Doc::hardline().concat(Doc::text("}")),
            )
        }
    }

    fn build_array(&mut self, array: &Array) -> Doc {
        let one_line = array.range.is_one_line();
        let Sequence { parts, .. } =
            self.build_sequence(&array.nodes.0, one_line, true, |_, _| Placement::InPlace);

        if parts.is_empty() {
            return Doc::text("[]");
        }
        if one_line {
            Doc::surround(Doc::text("["), parts.build(), Doc::text("]"))
        } else {
            Doc::surround(
                Doc::text("["),
                parts.build_indent(),
                Doc::hardline().concat(Doc::text("]")),
            )
        }
    }
}

/// The connector between two edge endpoints.
///
/// Empty arrow tokens print as `-`. When both sides carry an explicit head,
/// a `-` keeps them apart (`<` and `>` become `<->`).
fn arrow(edge: &Edge) -> String {
    let mut arrow = String::new();
    if edge.src_arrow.is_empty() {
        arrow.push('-');
    } else {
        arrow.push_str(&edge.src_arrow);
    }
    if edge.dst_arrow.is_empty() {
        arrow.push('-');
    } else {
        if !edge.src_arrow.is_empty() {
            arrow.push('-');
        }
        arrow.push_str(&edge.dst_arrow);
    }
    arrow
}

fn build_edge_index(index: &EdgeIndex) -> Doc {
    match index.index {
        Some(n) => Doc::text(format!("[{n}]")),
        None => Doc::text("[*]"),
    }
}

fn build_suspension(suspend: bool) -> Doc {
    Doc::text(if suspend { "suspend" } else { "unsuspend" })
}

fn build_boolean(value: bool) -> Doc {
    Doc::text(if value { "true" } else { "false" })
}

fn build_single_quoted(s: &SingleQuotedString) -> Doc {
    Doc::surround(
        Doc::text("'"),
        Doc::text(escape_single_quoted(&s.value)),
        Doc::text("'"),
    )
}

fn build_comment(comment: &Comment) -> Doc {
    Doc::join(
        comment.value.split('\n').map(|line| {
            if line.is_empty() {
                Doc::text("#")
            } else {
                Doc::text(format!("# {line}"))
            }
        }),
        Doc::hardline(),
    )
}

fn build_block_comment(comment: &BlockComment) -> Doc {
    let one_line = if comment.range.is_unset() {
        !comment.value.contains('\n')
    } else {
        comment.range.is_one_line()
    };
    if one_line {
        return Doc::text(format!(
            "{BLOCK_COMMENT_FENCE} {} {BLOCK_COMMENT_FENCE}",
            comment.value
        ));
    }

    let mut doc = DocBuilder::new();
    doc.text(BLOCK_COMMENT_FENCE);
    for line in comment.value.split('\n') {
        if line.is_empty() {
            doc.bare_line();
        } else {
            doc.hardline().text(line);
        }
    }
    doc.hardline().text(BLOCK_COMMENT_FENCE);
    doc.build()
}

#[cfg(test)]
mod tests {
    use d2_ast::{KeyPath, Range};

    use super::*;
    use crate::config::FormatConfig;
    use crate::printer::Printer;

    fn render(node: &Node) -> String {
        Printer::new(FormatConfig::default()).print(&FormatBuilder::new().build(node))
    }

    #[test]
    fn test_arrow() {
        let with = |src: &str, dst: &str| Edge::new(None, src, dst, None);
        assert_eq!(arrow(&with("", "")), "--");
        assert_eq!(arrow(&with("", ">")), "->");
        assert_eq!(arrow(&with("<", "")), "<-");
        assert_eq!(arrow(&with("<", ">")), "<->");
    }

    #[test]
    fn test_key_path_segments_use_key_escaping() {
        let path = KeyPath::from_segments(["cost $", "a.b"]);
        assert_eq!(render(&Node::KeyPath(path)), r"cost $.a\.b");
    }

    #[test]
    fn test_key_context_does_not_leak_into_values() {
        let key = Key::new(KeyPath::from_segments(["price"]))
            .with_value(Value::Scalar(Scalar::UnquotedString(UnquotedString::flat("$5"))));
        assert_eq!(render(&Node::Key(key)), r"price: \$5");
    }

    #[test]
    fn test_one_line_map_with_board() {
        let board = Key::new(KeyPath::from_segments(["layers"])).with_value(Value::Map(Map::new([
            Node::Key(Key::new(KeyPath::from_segments(["x"]))),
        ])));
        let map = Map::new([
            Node::Key(board),
            Node::Key(Key::new(KeyPath::from_segments(["a"]))),
        ])
        .with_range(Range::line(0));
        assert_eq!(render(&Node::Map(map)), "{ a; layers: { x } }");
    }

    #[test]
    fn test_block_comment_without_range_infers_layout() {
        let comment = BlockComment {
            value: "a\nb".to_string(),
            range: Range::UNSET,
        };
        assert_eq!(
            render(&Node::BlockComment(comment)),
            "\"\"\"\na\nb\n\"\"\""
        );
    }
}
