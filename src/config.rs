use std::cell::RefCell;

/// Immutable document-wide settings plus the shared output buffer.
///
/// One `TagConfig` is created per document by
/// [`TagBuilder::create_root`](crate::TagBuilder::create_root) and shared by
/// reference across every tag of the tree. The config owns the buffer; tags
/// only hold a non-owning handle back to it. The buffer is append-only: text
/// is written the moment enough is known, and nothing ever rewrites or seeks
/// backward into it.
pub(crate) struct TagConfig {
    /// Escape flag used when a call does not pass an explicit one.
    pub(crate) default_escape: bool,

    /// Spaces per indent level. 0 disables indentation entirely.
    indent_size: usize,

    /// Appended after every logical line when indentation is enabled.
    line_separator: String,

    /// The output sink for the whole document.
    buffer: RefCell<String>,
}

impl TagConfig {
    pub(crate) fn new(
        declaration: Option<&str>,
        indent_size: usize,
        default_escape: bool,
        line_separator: &str,
    ) -> Self {
        let mut buffer = String::new();

        // The declaration goes out first, before any element, on its own line.
        if let Some(declaration) = declaration.filter(|d| !d.is_empty()) {
            buffer.push_str(declaration);
            buffer.push_str(line_separator);
        }

        Self {
            default_escape,
            indent_size,
            line_separator: line_separator.to_string(),
            buffer: RefCell::new(buffer),
        }
    }

    fn indent_enabled(&self) -> bool {
        self.indent_size > 0
    }

    /// Appends raw text to the buffer.
    pub(crate) fn push(&self, text: &str) {
        self.buffer.borrow_mut().push_str(text);
    }

    /// Starts a logical line: `indent_size * level` spaces, if indenting.
    pub(crate) fn indent(&self, level: usize) {
        if self.indent_enabled() {
            let mut buffer = self.buffer.borrow_mut();
            for _ in 0..level * self.indent_size {
                buffer.push(' ');
            }
        }
    }

    /// Ends a logical line with the configured separator, if indenting.
    pub(crate) fn line_break(&self) {
        if self.indent_enabled() {
            self.buffer.borrow_mut().push_str(&self.line_separator);
        }
    }

    /// A copy of everything written so far.
    pub(crate) fn snapshot(&self) -> String {
        self.buffer.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_is_written_at_construction() {
        let config = TagConfig::new(Some("<?xml version=\"1.0\"?>"), 0, true, "\n");
        assert_eq!(config.snapshot(), "<?xml version=\"1.0\"?>\n");
    }

    #[test]
    fn empty_declaration_is_ignored() {
        let config = TagConfig::new(Some(""), 0, true, "\n");
        assert_eq!(config.snapshot(), "");
    }

    #[test]
    fn indentation_disabled_writes_no_spaces_or_breaks() {
        let config = TagConfig::new(None, 0, true, "\n");
        config.indent(3);
        config.push("x");
        config.line_break();
        assert_eq!(config.snapshot(), "x");
    }

    #[test]
    fn indentation_is_size_times_level() {
        let config = TagConfig::new(None, 2, true, "\n");
        config.indent(3);
        config.push("x");
        config.line_break();
        assert_eq!(config.snapshot(), "      x\n");
    }
}
