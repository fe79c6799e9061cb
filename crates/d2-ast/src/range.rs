//! Source positions attached to every syntax node.

/// A zero-based position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub byte: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32, byte: u32) -> Self {
        Self { line, column, byte }
    }
}

/// The source span of a node.
///
/// The printer only looks at line numbers: whether a node fit on one source
/// line, and how many lines separate two siblings. A default (all-zero) range
/// means the node was built programmatically rather than parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const UNSET: Range = Range {
        start: Position::new(0, 0, 0),
        end: Position::new(0, 0, 0),
    };

    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A range covering whole lines `start..=end`; columns and offsets are left at zero.
    pub const fn lines(start: u32, end: u32) -> Self {
        Self {
            start: Position::new(start, 0, 0),
            end: Position::new(end, 0, 0),
        }
    }

    /// A range that starts and ends on `line`.
    pub const fn line(line: u32) -> Self {
        Self::lines(line, line)
    }

    /// Whether the node started and ended on the same source line.
    pub fn is_one_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Whether this is the default range of a node built outside the parser.
    pub fn is_unset(&self) -> bool {
        *self == Range::UNSET
    }
}
