use std::rc::Rc;

use crate::config::TagConfig;
use crate::tag::Tag;

#[cfg(windows)]
const DEFAULT_LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const DEFAULT_LINE_SEPARATOR: &str = "\n";

const DEFAULT_ESCAPE: bool = true;

/// Indentation is disabled by default.
const INDENT_DISABLED: usize = 0;

/// Builder for creating tag documents.
///
/// The builder collects the document-wide settings — declaration prologue,
/// indent width, default escape policy, line separator — and
/// [`create_root`](TagBuilder::create_root) turns them into the root tag of
/// a fresh document. The same builder may be reused to start independent
/// documents; each root gets its own output buffer, so documents never
/// share state.
///
/// # Examples
///
/// ```
/// use tagstream::TagBuilder;
///
/// let builder = TagBuilder::new()
///     .declaration("<?xml version=\"1.0\"?>")
///     .indent_size(2)
///     .line_separator("\n");
///
/// let root = builder.create_root("catalog");
/// root.create_child("product").unwrap().content("Laptop").unwrap();
///
/// assert_eq!(
///     root.finish().unwrap(),
///     "<?xml version=\"1.0\"?>\n\
///      <catalog>\n\
///      \x20\x20<product>\n\
///      \x20\x20\x20\x20Laptop\n\
///      \x20\x20</product>\n\
///      </catalog>\n"
/// );
/// ```
pub struct TagBuilder {
    declaration: Option<String>,
    indent_size: usize,
    default_escape: bool,
    line_separator: String,
}

impl Default for TagBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TagBuilder {
    /// Creates a builder with the default settings: no declaration,
    /// indentation disabled, escaping enabled, platform line ending.
    pub fn new() -> Self {
        Self {
            declaration: None,
            indent_size: INDENT_DISABLED,
            default_escape: DEFAULT_ESCAPE,
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
        }
    }

    /// Sets the declaration written verbatim on its own line before any
    /// element output, e.g. `<!DOCTYPE html>`. An empty declaration is
    /// ignored.
    pub fn declaration(mut self, declaration: &str) -> Self {
        self.declaration = Some(declaration.to_string());
        self
    }

    /// Sets the number of spaces per indent level. 0 disables indentation
    /// entirely: no spaces and no line breaks.
    pub fn indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    /// Sets the escape policy used when a call does not pass an explicit
    /// flag. Defaults to `true`.
    pub fn default_escape(mut self, default_escape: bool) -> Self {
        self.default_escape = default_escape;
        self
    }

    /// Sets the line separator appended after every structural line when
    /// indentation is enabled. Defaults to the platform line ending.
    pub fn line_separator(mut self, line_separator: &str) -> Self {
        self.line_separator = line_separator.to_string();
        self
    }

    /// Creates the root tag of a fresh document with these settings.
    pub fn create_root(&self, name: &str) -> Tag {
        let config = TagConfig::new(
            self.declaration.as_deref(),
            self.indent_size,
            self.default_escape,
            &self.line_separator,
        );

        Tag::root(name, Rc::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_precedes_the_root_tag() {
        let builder = TagBuilder::new()
            .declaration("<?xml version=\"1.0\" encoding=\"UTF-8\"?>")
            .line_separator("\n");

        let root = builder.create_root("root");
        assert_eq!(
            root.finish().unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root/>"
        );
    }

    #[test]
    fn empty_declaration_is_ignored() {
        let root = TagBuilder::new().declaration("").create_root("root");
        assert_eq!(root.finish().unwrap(), "<root/>");
    }

    #[test]
    fn builder_is_reusable_for_independent_documents() {
        let builder = TagBuilder::new();

        let first = builder.create_root("first");
        let second = builder.create_root("second");
        second.create_child("child").unwrap();

        // Each document has its own buffer.
        assert_eq!(first.finish().unwrap(), "<first/>");
        assert_eq!(second.finish().unwrap(), "<second><child/></second>");
    }

    #[test]
    fn indentation_disabled_by_default() {
        let root = TagBuilder::new().create_root("root");
        root.create_child("child").unwrap();
        assert_eq!(root.finish().unwrap(), "<root><child/></root>");
    }
}
