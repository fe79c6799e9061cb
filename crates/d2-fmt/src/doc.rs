//! Document IR for the D2 formatter.
//!
//! Layout decisions (one line or many) are taken from source ranges while the
//! IR is built, so unlike a width-driven pretty printer there are no groups:
//! a `Doc` is a fixed sequence of text, line breaks and indentation changes.

/// Intermediate representation for formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doc {
    /// Empty document
    Nil,

    /// Literal text (no line breaks allowed within)
    Text(String),

    /// A newline followed by the current indentation.
    HardLine,

    /// A newline with no indentation, for blank lines that must not carry
    /// trailing whitespace.
    BareLine,

    /// Increase indentation for the nested document.
    Indent(Box<Doc>),

    /// Concatenate two documents.
    Concat(Box<Doc>, Box<Doc>),
}

impl Doc {
    /// Create a text document.
    pub fn text(s: impl Into<String>) -> Doc {
        let s = s.into();
        if s.is_empty() { Doc::Nil } else { Doc::Text(s) }
    }

    /// Create a hard line break.
    pub fn hardline() -> Doc {
        Doc::HardLine
    }

    /// Create an unindented line break.
    pub fn bare_line() -> Doc {
        Doc::BareLine
    }

    /// Indent the given document.
    pub fn indent(doc: Doc) -> Doc {
        if matches!(doc, Doc::Nil) {
            Doc::Nil
        } else {
            Doc::Indent(Box::new(doc))
        }
    }

    /// Concatenate two documents.
    pub fn concat(self, other: Doc) -> Doc {
        match (self, other) {
            (Doc::Nil, other) => other,
            (this, Doc::Nil) => this,
            (this, other) => Doc::Concat(Box::new(this), Box::new(other)),
        }
    }

    /// Join multiple documents with a separator.
    pub fn join(docs: impl IntoIterator<Item = Doc>, sep: Doc) -> Doc {
        let mut result = Doc::Nil;
        let mut first = true;
        for doc in docs {
            if first {
                first = false;
                result = doc;
            } else {
                result = result.concat(sep.clone()).concat(doc);
            }
        }
        result
    }

    /// Concatenate multiple documents.
    pub fn concat_all(docs: impl IntoIterator<Item = Doc>) -> Doc {
        let mut result = Doc::Nil;
        for doc in docs {
            result = result.concat(doc);
        }
        result
    }

    /// Wrap content with prefix and suffix.
    pub fn surround(prefix: Doc, content: Doc, suffix: Doc) -> Doc {
        prefix.concat(content).concat(suffix)
    }
}

/// Builder for constructing documents fluently.
#[derive(Debug, Default)]
pub struct DocBuilder {
    parts: Vec<Doc>,
}

impl DocBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Add text.
    pub fn text(&mut self, s: impl Into<String>) -> &mut Self {
        self.parts.push(Doc::text(s));
        self
    }

    /// Add a hard line break.
    pub fn hardline(&mut self) -> &mut Self {
        self.parts.push(Doc::hardline());
        self
    }

    /// Add an unindented line break.
    pub fn bare_line(&mut self) -> &mut Self {
        self.parts.push(Doc::bare_line());
        self
    }

    /// Add a document.
    pub fn push(&mut self, doc: Doc) -> &mut Self {
        self.parts.push(doc);
        self
    }

    /// Whether nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|d| matches!(d, Doc::Nil))
    }

    /// Build the final document.
    pub fn build(self) -> Doc {
        Doc::concat_all(self.parts)
    }

    /// Build with indentation.
    pub fn build_indent(self) -> Doc {
        Doc::indent(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatConfig;
    use crate::printer::Printer;

    fn print(doc: &Doc) -> String {
        Printer::new(FormatConfig::default()).print(doc)
    }

    #[test]
    fn test_text_empty() {
        assert_eq!(Doc::text(""), Doc::Nil);
    }

    #[test]
    fn test_text_non_empty() {
        assert_eq!(Doc::text("hello"), Doc::Text("hello".to_string()));
    }

    #[test]
    fn test_concat_nil() {
        let doc = Doc::text("a").concat(Doc::Nil);
        assert_eq!(doc, Doc::Text("a".to_string()));

        let doc = Doc::Nil.concat(Doc::text("b"));
        assert_eq!(doc, Doc::Text("b".to_string()));
    }

    #[test]
    fn test_indent_nil() {
        assert_eq!(Doc::indent(Doc::Nil), Doc::Nil);
    }

    #[test]
    fn test_join() {
        let docs = vec![Doc::text("a"), Doc::text("b"), Doc::text("c")];
        let joined = Doc::join(docs, Doc::text("; "));
        assert_eq!(print(&joined), "a; b; c");

        assert_eq!(Doc::join(Vec::new(), Doc::text("; ")), Doc::Nil);
    }

    #[test]
    fn test_builder() {
        let mut b = DocBuilder::new();
        assert!(b.is_empty());
        b.text("hello").hardline().text("world");
        assert!(!b.is_empty());
        assert_eq!(print(&b.build()), "hello\nworld");
    }
}
