//! Syntax tree of the D2 diagram language.
//!
//! Trees are normally produced by a parser; the constructors here exist so
//! that tools can build or rewrite trees programmatically and print them with
//! `d2-fmt`.

/// Source positions.
pub mod range;

/// Node types.
pub mod node;

/// String scalars and quoting-style selection.
pub mod string;

/// Reserved keywords and special-character tables.
pub mod keyword;

pub use keyword::is_reserved_keyword;
pub use node::*;
pub use range::{Position, Range};
pub use string::{
    BlockString, DoubleQuotedString, InterpolationBox, SingleQuotedString, StringNode,
    UnquotedString, raw_string,
};
