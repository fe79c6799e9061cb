//! The D2 syntax tree.

use std::borrow::Cow;
use std::fmt;

use thisisplural::Plural;

use crate::range::Range;
use crate::string::{
    BlockString, DoubleQuotedString, SingleQuotedString, StringNode, UnquotedString,
};

/// Any node of a D2 document.
///
/// The set is closed: consumers match on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    LineComment(Comment),
    BlockComment(BlockComment),
    Null(Null),
    Suspension(Suspension),
    Boolean(Boolean),
    Number(Number),
    UnquotedString(UnquotedString),
    DoubleQuotedString(DoubleQuotedString),
    SingleQuotedString(SingleQuotedString),
    BlockString(BlockString),
    Substitution(Substitution),
    Import(Import),
    Array(Array),
    Map(Map),
    Key(Key),
    KeyPath(KeyPath),
    Edge(Edge),
    EdgeIndex(EdgeIndex),
}

impl Node {
    pub fn range(&self) -> Range {
        match self {
            Node::LineComment(n) => n.range,
            Node::BlockComment(n) => n.range,
            Node::Null(n) => n.range,
            Node::Suspension(n) => n.range,
            Node::Boolean(n) => n.range,
            Node::Number(n) => n.range,
            Node::UnquotedString(n) => n.range,
            Node::DoubleQuotedString(n) => n.range,
            Node::SingleQuotedString(n) => n.range,
            Node::BlockString(n) => n.range,
            Node::Substitution(n) => n.range,
            Node::Import(n) => n.range,
            Node::Array(n) => n.range,
            Node::Map(n) => n.range,
            Node::Key(n) => n.range,
            Node::KeyPath(n) => n.range,
            Node::Edge(n) => n.range,
            Node::EdgeIndex(n) => n.range,
        }
    }

    /// Line and block comments.
    pub fn is_comment(&self) -> bool {
        matches!(self, Node::LineComment(_) | Node::BlockComment(_))
    }
}

/// A `#` comment. Multi-line values come from consecutive comment lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Comment {
    pub value: String,
    pub range: Range,
}

/// A `"""`-fenced comment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockComment {
    pub value: String,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Null {
    pub range: Range,
}

/// `suspend` (true) or `unsuspend` (false).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Suspension {
    pub value: bool,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Boolean {
    pub value: bool,
    pub range: Range,
}

/// A numeric literal, kept as written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Number {
    pub raw: String,
    pub range: Range,
}

/// A variable reference: `${path}`, or `...${path}` when spread.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub spread: bool,
    pub path: KeyPath,
    pub range: Range,
}

/// A file reference: `@pre/path`, or `...@pre/path` when spread.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub spread: bool,
    /// Relative directory prefix such as `../` or `x/`, written verbatim.
    pub pre: String,
    pub path: KeyPath,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Default, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, from_iter, new)]
pub struct Nodes(pub Vec<Node>);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    pub nodes: Nodes,
    pub range: Range,
}

/// A `{ … }` scope, or the whole file when `is_file` is set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    pub nodes: Nodes,
    pub range: Range,
    pub is_file: bool,
}

impl Map {
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            range: Range::UNSET,
            is_file: false,
        }
    }

    /// The top-level scope of a document.
    pub fn file(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            is_file: true,
            ..Self::new(nodes)
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }
}

impl Array {
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            range: Range::UNSET,
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }
}

/// `&` or `!&` in front of a key, used by globs and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMarker {
    Declare,
    NegateDeclare,
}

/// A scalar that may stand on the right of `:`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null(Null),
    Suspension(Suspension),
    Boolean(Boolean),
    Number(Number),
    UnquotedString(UnquotedString),
    DoubleQuotedString(DoubleQuotedString),
    SingleQuotedString(SingleQuotedString),
    BlockString(BlockString),
}

/// The value bound to a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Import(Import),
    Array(Array),
    Map(Map),
}

impl Value {
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// A map entry: a declaration, an attribute, or an edge chain.
///
/// ```text
/// &a.b.(x -> y)[0].style.fill: red
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Key {
    pub marker: Option<KeyMarker>,
    pub key: Option<KeyPath>,
    pub edges: Vec<Edge>,
    pub edge_index: Option<EdgeIndex>,
    /// Attribute path written after an edge chain, e.g. `style.stroke`.
    pub edge_key: Option<KeyPath>,
    /// Shorthand value written before a map value: `x: Label { … }`.
    pub primary: Option<Scalar>,
    pub value: Option<Value>,
    pub range: Range,
}

impl Key {
    pub fn new(key: KeyPath) -> Self {
        Self {
            key: Some(key),
            ..Default::default()
        }
    }

    /// An edge chain without a scoping key path.
    pub fn edge_chain(edges: impl IntoIterator<Item = Edge>) -> Self {
        Self {
            edges: edges.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_primary(mut self, primary: Scalar) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }
}

/// A dotted path of string segments.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPath {
    pub path: Vec<StringNode>,
    pub range: Range,
}

impl KeyPath {
    pub fn new(path: Vec<StringNode>) -> Self {
        Self {
            path,
            range: Range::UNSET,
        }
    }

    /// A path of unquoted segments.
    pub fn from_segments<S: AsRef<str>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            segments
                .into_iter()
                .map(|s| StringNode::from(s.as_ref()))
                .collect(),
        )
    }

    /// Unescaped segment values.
    pub fn segments(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.path.iter().map(StringNode::scalar_string)
    }

    /// The only segment's value, if the path has exactly one.
    pub fn single_segment(&self) -> Option<Cow<'_, str>> {
        match self.path.as_slice() {
            [only] => Some(only.scalar_string()),
            _ => None,
        }
    }
}

impl fmt::Display for KeyPath {
    /// Raw segment values joined by `.`; not guaranteed to re-parse.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment)?;
        }
        Ok(())
    }
}

/// A connection between two key paths.
///
/// Arrow tokens are empty for a plain connector, or the explicit head (`<`,
/// `>`, …) written on that side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edge {
    pub src: Option<KeyPath>,
    pub src_arrow: String,
    pub dst: Option<KeyPath>,
    pub dst_arrow: String,
    pub range: Range,
}

impl Edge {
    pub fn new(
        src: Option<KeyPath>,
        src_arrow: impl Into<String>,
        dst_arrow: impl Into<String>,
        dst: Option<KeyPath>,
    ) -> Self {
        Self {
            src,
            src_arrow: src_arrow.into(),
            dst,
            dst_arrow: dst_arrow.into(),
            range: Range::UNSET,
        }
    }
}

/// `[n]` or the `[*]` wildcard after an edge chain.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeIndex {
    /// `None` is the wildcard.
    pub index: Option<u64>,
    pub range: Range,
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null(n) => Node::Null(n),
            Scalar::Suspension(n) => Node::Suspension(n),
            Scalar::Boolean(n) => Node::Boolean(n),
            Scalar::Number(n) => Node::Number(n),
            Scalar::UnquotedString(n) => Node::UnquotedString(n),
            Scalar::DoubleQuotedString(n) => Node::DoubleQuotedString(n),
            Scalar::SingleQuotedString(n) => Node::SingleQuotedString(n),
            Scalar::BlockString(n) => Node::BlockString(n),
        }
    }
}

impl From<StringNode> for Node {
    fn from(s: StringNode) -> Self {
        match s {
            StringNode::Unquoted(n) => Node::UnquotedString(n),
            StringNode::DoubleQuoted(n) => Node::DoubleQuotedString(n),
            StringNode::SingleQuoted(n) => Node::SingleQuotedString(n),
            StringNode::Block(n) => Node::BlockString(n),
        }
    }
}

impl From<Key> for Node {
    fn from(key: Key) -> Self {
        Node::Key(key)
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node::Map(map)
    }
}

impl From<Array> for Node {
    fn from(array: Array) -> Self {
        Node::Array(array)
    }
}
