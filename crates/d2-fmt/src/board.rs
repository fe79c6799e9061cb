//! Placement of nested boards (`layers`, `scenarios`, `steps`).
//!
//! Boards are printed after every other entry of their scope, grouped by kind
//! in the order `layers`, `scenarios`, `steps`. Within a kind, entries keep
//! the order in which they appeared. A board group whose map is empty is
//! dropped.

use d2_ast::{Key, Node, Value};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoardKind {
    Layers,
    Scenarios,
    Steps,
}

impl BoardKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "layers" => Some(BoardKind::Layers),
            "scenarios" => Some(BoardKind::Scenarios),
            "steps" => Some(BoardKind::Steps),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoardKind::Layers => "layers",
            BoardKind::Scenarios => "scenarios",
            BoardKind::Steps => "steps",
        }
    }
}

/// How a map entry takes part in board placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification<'a> {
    /// Printed in place.
    Ordinary,
    /// A board group with at least one board; printed at the end of the scope.
    Board(BoardKind, &'a Key),
    /// A board group with no boards; not printed at all.
    EmptyBoard(BoardKind),
}

/// Classify a map entry.
///
/// Only a key whose path is exactly one reserved name and whose value is a
/// map counts; `layers.x: {…}` or `layers: 1` are ordinary entries.
pub fn classify(node: &Node) -> Classification<'_> {
    let Node::Key(key) = node else {
        return Classification::Ordinary;
    };
    if !key.edges.is_empty() {
        return Classification::Ordinary;
    }
    let Some(kind) = key
        .key
        .as_ref()
        .and_then(|path| path.single_segment())
        .and_then(|name| BoardKind::from_name(&name))
    else {
        return Classification::Ordinary;
    };
    match key.value.as_ref().and_then(Value::as_map) {
        Some(map) if map.nodes.is_empty() => Classification::EmptyBoard(kind),
        Some(_) => Classification::Board(kind, key),
        None => Classification::Ordinary,
    }
}

/// What happens to a map entry offered to a [`BoardOrganizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Printed in sequence.
    InPlace,
    /// Collected together with its trailing comment.
    Moved,
    /// An empty board group. Its trailing comment, if any, stays in sequence.
    Dropped,
}

/// A collected board and the comment that followed it on its last line.
#[derive(Debug, Clone, Copy)]
pub struct BoardEntry<'a> {
    pub key: &'a Key,
    pub trailing: Option<&'a Node>,
}

/// Collects the board entries of one map while its other entries are printed.
#[derive(Debug, Default)]
pub struct BoardOrganizer<'a> {
    layers: Vec<BoardEntry<'a>>,
    scenarios: Vec<BoardEntry<'a>>,
    steps: Vec<BoardEntry<'a>>,
}

impl<'a> BoardOrganizer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an entry, along with the comment trailing it on the same line.
    pub fn place(&mut self, node: &'a Node, trailing: Option<&'a Node>) -> Placement {
        match classify(node) {
            Classification::Ordinary => Placement::InPlace,
            Classification::Board(kind, key) => {
                trace!(board = kind.as_str(), "moving board group to end of scope");
                self.group_mut(kind).push(BoardEntry { key, trailing });
                Placement::Moved
            }
            Classification::EmptyBoard(kind) => {
                trace!(board = kind.as_str(), "dropping empty board group");
                Placement::Dropped
            }
        }
    }

    fn group_mut(&mut self, kind: BoardKind) -> &mut Vec<BoardEntry<'a>> {
        match kind {
            BoardKind::Layers => &mut self.layers,
            BoardKind::Scenarios => &mut self.scenarios,
            BoardKind::Steps => &mut self.steps,
        }
    }

    /// Collected entries in output order.
    pub fn into_ordered(self) -> impl Iterator<Item = BoardEntry<'a>> {
        self.layers
            .into_iter()
            .chain(self.scenarios)
            .chain(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use d2_ast::{Comment, KeyPath, Map, Range, Scalar, UnquotedString};

    use super::*;

    fn board(name: &str, children: &[&str]) -> Node {
        let map = Map::new(
            children
                .iter()
                .map(|c| Node::Key(Key::new(KeyPath::from_segments([*c])))),
        );
        Node::Key(Key::new(KeyPath::from_segments([name])).with_value(Value::Map(map)))
    }

    fn plain(name: &str) -> Node {
        Node::Key(Key::new(KeyPath::from_segments([name])))
    }

    #[test]
    fn test_classify_board() {
        let node = board("layers", &["x"]);
        assert!(matches!(
            classify(&node),
            Classification::Board(BoardKind::Layers, _)
        ));
    }

    #[test]
    fn test_classify_empty_board() {
        let node = board("scenarios", &[]);
        assert_eq!(
            classify(&node),
            Classification::EmptyBoard(BoardKind::Scenarios)
        );
    }

    #[test]
    fn test_classify_ordinary() {
        assert_eq!(classify(&plain("layers")), Classification::Ordinary);
        assert_eq!(classify(&board("layer", &["x"])), Classification::Ordinary);

        let nested = Node::Key(
            Key::new(KeyPath::from_segments(["layers", "x"]))
                .with_value(Value::Map(Map::new([plain("y")]))),
        );
        assert_eq!(classify(&nested), Classification::Ordinary);

        let scalar = Node::Key(
            Key::new(KeyPath::from_segments(["steps"]))
                .with_value(Value::Scalar(Scalar::UnquotedString(UnquotedString::flat("x")))),
        );
        assert_eq!(classify(&scalar), Classification::Ordinary);
    }

    #[test]
    fn test_groups_ordered_by_kind_then_appearance() {
        let nodes = [
            board("steps", &["s1"]),
            board("layers", &["l1"]),
            plain("a"),
            board("scenarios", &["c1"]),
            board("layers", &["l2"]),
            board("steps", &[]),
        ];
        let mut organizer = BoardOrganizer::new();
        let placements: Vec<Placement> =
            nodes.iter().map(|node| organizer.place(node, None)).collect();
        assert_eq!(
            placements,
            [
                Placement::Moved,
                Placement::Moved,
                Placement::InPlace,
                Placement::Moved,
                Placement::Moved,
                Placement::Dropped,
            ]
        );

        let order: Vec<String> = organizer
            .into_ordered()
            .map(|entry| match &entry.key.value {
                Some(Value::Map(map)) => match &map.nodes.0[0] {
                    Node::Key(k) => k.key.as_ref().map(|p| p.to_string()).unwrap_or_default(),
                    _ => String::new(),
                },
                _ => String::new(),
            })
            .collect();
        assert_eq!(order, ["l1", "l2", "c1", "s1"]);
    }

    #[test]
    fn test_trailing_comment_travels_with_board() {
        let nodes = [
            board("layers", &["x"]),
            Node::LineComment(Comment {
                value: "views".to_string(),
                range: Range::UNSET,
            }),
        ];
        let mut organizer = BoardOrganizer::new();
        assert_eq!(organizer.place(&nodes[0], Some(&nodes[1])), Placement::Moved);

        let entries: Vec<BoardEntry<'_>> = organizer.into_ordered().collect();
        assert_eq!(entries.len(), 1);
        assert!(matches!(
            entries[0].trailing,
            Some(Node::LineComment(c)) if c.value == "views"
        ));
    }
}
