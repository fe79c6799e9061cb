//! Block strings: fence selection and layout.
//!
//! ```text
//! x: |md
//!   # Title
//!
//!   Body with a `|` pipe.
//! |
//! ```

use d2_ast::BlockString;

use crate::doc::{Doc, DocBuilder};

/// The character that opens and closes every block string.
pub const BLOCK_DELIMITER: char = '|';

/// Choose the shortest extension of `seed` that cannot be confused with
/// `value`.
///
/// The fence collides when the content contains the delimiter directly next
/// to it, on the opening (`|fence`) or the closing (`fence|`) side. Each
/// collision extends the fence by its own last character, or by the delimiter
/// itself when the fence is empty.
pub fn fence(value: &str, seed: &str) -> String {
    let mut quote = seed.to_string();
    loop {
        let open = format!("{BLOCK_DELIMITER}{quote}");
        let close = format!("{quote}{BLOCK_DELIMITER}");
        if !value.contains(&open) && !value.contains(&close) {
            return quote;
        }
        let last = quote.chars().last().unwrap_or(BLOCK_DELIMITER);
        quote.push(last);
    }
}

/// The text to print and whether to spread it over several lines.
///
/// Parsed block strings keep the layout they were written in. Block strings
/// built in code have no range, so any embedded newline makes them
/// multi-line, and surrounding whitespace is dropped.
pub fn layout(bs: &BlockString) -> (&str, bool) {
    if bs.range.is_unset() {
        (bs.value.trim(), bs.value.contains('\n'))
    } else {
        (bs.value.as_str(), !bs.range.is_one_line())
    }
}

pub(crate) fn build_block_string(bs: &BlockString) -> Doc {
    let (value, multiline) = layout(bs);
    let quote = fence(value, &bs.quote);
    let open = Doc::text(format!("{BLOCK_DELIMITER}{quote}{}", bs.tag));
    let close = Doc::text(format!("{quote}{BLOCK_DELIMITER}"));

    if multiline {
        let mut lines = DocBuilder::new();
        for line in value.split('\n') {
            if line.is_empty() {
                lines.bare_line();
            } else {
                lines.hardline().text(line);
            }
        }
        return open
            .concat(lines.build_indent())
            .concat(Doc::hardline())
            .concat(close);
    }

    let mut doc = open.concat(Doc::text(" "));
    if !value.is_empty() {
        doc = doc.concat(Doc::text(value)).concat(Doc::text(" "));
    }
    doc.concat(close)
}
