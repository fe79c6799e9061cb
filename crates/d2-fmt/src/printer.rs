//! Renders the document IR to a string.

use crate::config::FormatConfig;
use crate::doc::Doc;

/// A command on the printer's work stack.
#[derive(Debug, Clone)]
struct PrintCommand<'a> {
    /// Current indentation level
    indent: usize,
    /// Document to print
    doc: &'a Doc,
}

/// Printer that renders Doc to String.
pub struct Printer {
    config: FormatConfig,
}

impl Printer {
    /// Create a new printer with the given configuration.
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Print a document to a string.
    pub fn print(&self, doc: &Doc) -> String {
        let mut output = String::new();
        let mut stack = vec![PrintCommand { indent: 0, doc }];

        while let Some(cmd) = stack.pop() {
            match cmd.doc {
                Doc::Nil => {}

                Doc::Text(s) => output.push_str(s),

                Doc::HardLine => {
                    output.push('\n');
                    output.push_str(&self.config.indent_string(cmd.indent));
                }

                Doc::BareLine => output.push('\n'),

                Doc::Indent(inner) => {
                    stack.push(PrintCommand {
                        indent: cmd.indent + 1,
                        doc: inner,
                    });
                }

                Doc::Concat(left, right) => {
                    // Push right first so left is processed first (stack is LIFO)
                    stack.push(PrintCommand {
                        indent: cmd.indent,
                        doc: right,
                    });
                    stack.push(PrintCommand {
                        indent: cmd.indent,
                        doc: left,
                    });
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(doc: &Doc) -> String {
        Printer::new(FormatConfig::default()).print(doc)
    }

    #[test]
    fn test_text() {
        let doc = Doc::text("hello");
        assert_eq!(print(&doc), "hello");
    }

    #[test]
    fn test_concat() {
        let doc = Doc::text("hello").concat(Doc::text(" world"));
        assert_eq!(print(&doc), "hello world");
    }

    #[test]
    fn test_indent() {
        // Indent wraps the newline to get indented content
        let doc = Doc::text("a").concat(Doc::indent(Doc::hardline().concat(Doc::text("b"))));
        assert_eq!(print(&doc), "a\n  b");
    }

    #[test]
    fn test_bare_line_has_no_indent() {
        let doc = Doc::text("a").concat(Doc::indent(
            Doc::bare_line()
                .concat(Doc::hardline())
                .concat(Doc::text("b")),
        ));
        assert_eq!(print(&doc), "a\n\n  b");
    }

    #[test]
    fn test_nested_indent() {
        let inner = Doc::indent(Doc::hardline().concat(Doc::text("c")));
        let outer = Doc::indent(Doc::hardline().concat(Doc::text("b")).concat(inner));
        let doc = Doc::text("a").concat(outer);

        assert_eq!(print(&doc), "a\n  b\n    c");
    }

    #[test]
    fn test_tabs() {
        let doc = Doc::text("{").concat(Doc::indent(Doc::hardline().concat(Doc::text("x"))));
        let out = Printer::new(FormatConfig::new().with_tabs(true)).print(&doc);
        assert_eq!(out, "{\n\tx");
    }
}
