//! Canonical formatter for D2.
//!
//! [`format`] turns any syntax tree node into source text that parses back to
//! an equivalent tree, with normalized quoting, escaping, indentation and
//! comment placement, and with board groups (`layers`, `scenarios`, `steps`)
//! moved to the end of their scope.
//!
//! The pipeline is tree → [`Doc`] ([`builder`]) → `String` ([`printer`]).

pub mod block;
pub mod board;
pub mod builder;
pub mod config;
pub mod doc;
pub mod escape;
pub mod key_path;
pub mod printer;

use d2_ast::Node;
use tracing::debug;

pub use builder::FormatBuilder;
pub use config::FormatConfig;
pub use doc::Doc;
pub use key_path::{KeyPathError, format_key_path};
pub use printer::Printer;

/// Build the Doc IR for a node.
pub fn build_doc(node: &Node) -> Doc {
    FormatBuilder::new().build(node)
}

/// Format a node with the default configuration.
pub fn format(node: &Node) -> String {
    format_with_config(node, &FormatConfig::default())
}

/// Format a node.
pub fn format_with_config(node: &Node, config: &FormatConfig) -> String {
    let range = node.range();
    debug!(
        start_line = range.start.line,
        end_line = range.end.line,
        "formatting node"
    );
    Printer::new(config.clone()).print(&build_doc(node))
}
