use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;
use quick_xml::escape::escape;

use crate::config::TagConfig;
use crate::error::{InvalidTagReason, TagError};

const OPENING_TAG_START: &str = "<";
const CLOSING_TAG_START: &str = "</";
const TAG_END: &str = ">";
const EMPTY_TAG_END: &str = "/>";

/// The three lifecycle states of a tag.
///
/// Transitions are irreversible: `Open -> HasContent -> Closed` or
/// `Open -> Closed`, never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagState {
    /// The tag header is started; attributes are still accepted and the
    /// closing `>` has not been written yet.
    Open,
    /// The header is finished; children and text are being interleaved.
    HasContent,
    /// Terminal. Every further call fails.
    Closed,
}

struct TagNode {
    name: String,
    /// The latest direct child only. Earlier siblings are already fully
    /// closed and flushed by the time a new one is attached. Taken by the
    /// cascade-close. Node-to-node links only point downward, so dropping
    /// every handle frees an abandoned document.
    child: Option<Rc<RefCell<TagNode>>>,
    state: TagState,
    /// Fixed at creation: parent depth + 1, root 0. Drives indentation only.
    depth: usize,
    config: Rc<TagConfig>,
}

impl TagNode {
    /// Creates a node and immediately writes its indented `<name` header
    /// start into the shared buffer.
    fn new(name: &str, depth: usize, config: Rc<TagConfig>) -> Self {
        config.indent(depth);
        config.push(OPENING_TAG_START);
        config.push(name);

        Self {
            name: name.to_string(),
            child: None,
            state: TagState::Open,
            depth,
            config,
        }
    }

    /// Finalizes the header of an `Open` tag (example so far: `<tag
    /// key="value"`): writes `>` plus a line break and moves to `HasContent`.
    fn finish_header(&mut self) {
        self.config.push(TAG_END);
        self.config.line_break();
        self.state = TagState::HasContent;
    }

    fn close(&mut self) -> Result<(), TagError> {
        debug!("Closing tag '{}'", self.name);

        match self.state {
            TagState::Open => {
                // Nothing was ever added: the tag is self-closing.
                self.config.push(EMPTY_TAG_END);
                self.config.line_break();
            }
            TagState::HasContent => {
                self.config.indent(self.depth);
                self.config.push(CLOSING_TAG_START);
                self.config.push(&self.name);
                self.config.push(TAG_END);
                self.config.line_break();
            }
            TagState::Closed => {
                return Err(TagError::invalid(&self.name, InvalidTagReason::AlreadyClosed));
            }
        }

        self.state = TagState::Closed;
        Ok(())
    }
}

/// Closes the node's live child subtree, deepest node first, and clears the
/// child link so the old subtree can never be mutated again.
fn close_descendants(node: &Rc<RefCell<TagNode>>) -> Result<(), TagError> {
    let child = node.borrow_mut().child.take();

    if let Some(child) = child {
        close_descendants(&child)?;
        child.borrow_mut().close()?;
    }

    Ok(())
}

fn escape_if(value: &str, do_escape: bool) -> Cow<'_, str> {
    if do_escape {
        escape(value)
    } else {
        Cow::Borrowed(value)
    }
}

/// One markup element of the document being built.
///
/// A `Tag` is a cheap clonable handle to the underlying node; clones refer to
/// the same element, so parent and child handles stay usable while content
/// and children are interleaved. Tags are created by
/// [`TagBuilder::create_root`](crate::TagBuilder::create_root) or
/// [`create_child`](Tag::create_child), never directly.
///
/// Output is streamed: every operation appends to the shared document buffer
/// as soon as enough is known. There is no explicit close operation — a tag
/// is closed automatically when its parent spawns a new child, when content
/// is appended to the parent, or when [`finish`](Tag::finish) is called
/// anywhere in the tree.
///
/// # Examples
///
/// ```
/// use tagstream::TagBuilder;
///
/// let root = TagBuilder::new().create_root("catalog");
/// let product = root.create_child("product").unwrap();
/// product.attr("id", "P001").unwrap();
/// product.content("Wireless Headphones").unwrap();
///
/// assert_eq!(
///     root.finish().unwrap(),
///     "<catalog><product id=\"P001\">Wireless Headphones</product></catalog>"
/// );
/// ```
#[derive(Clone)]
pub struct Tag {
    node: Rc<RefCell<TagNode>>,
    /// Every handle keeps the root alive so that [`finish`](Tag::finish)
    /// can delegate to it; node-to-node links only point downward.
    root: Rc<RefCell<TagNode>>,
}

impl Tag {
    /// Called from `TagBuilder` only.
    pub(crate) fn root(name: &str, config: Rc<TagConfig>) -> Self {
        let node = Rc::new(RefCell::new(TagNode::new(name, 0, config)));
        Self {
            root: Rc::clone(&node),
            node,
        }
    }

    /// Creates a child tag and returns its handle.
    ///
    /// If this tag is still `Open`, its header is finalized first (`>` is
    /// written and attributes are no longer accepted). If a previous child
    /// is still live, its whole subtree is force-closed before the new
    /// child's opening tag is written, so document order always matches call
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidTagOperation`] if this tag is already
    /// closed.
    pub fn create_child(&self, name: &str) -> Result<Tag, TagError> {
        debug!("Creating child '{}' of '{}'", name, self.name());

        let state = self.node.borrow().state;
        match state {
            TagState::Open => self.node.borrow_mut().finish_header(),
            TagState::HasContent => close_descendants(&self.node)?,
            TagState::Closed => {
                return Err(TagError::invalid(
                    &self.name(),
                    InvalidTagReason::AlreadyClosed,
                ));
            }
        }

        let (depth, config) = {
            let node = self.node.borrow();
            (node.depth + 1, Rc::clone(&node.config))
        };

        let child = Rc::new(RefCell::new(TagNode::new(name, depth, config)));
        self.node.borrow_mut().child = Some(Rc::clone(&child));

        Ok(Tag {
            node: child,
            root: Rc::clone(&self.root),
        })
    }

    /// Adds an attribute, escaping the value per the document default.
    ///
    /// Attributes must precede any child or content.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidTagOperation`] if the tag header is
    /// already finished.
    pub fn attr(&self, key: &str, value: &str) -> Result<Tag, TagError> {
        let do_escape = self.node.borrow().config.default_escape;
        self.attr_escape(key, value, do_escape)
    }

    /// Adds an attribute with an explicit escape flag overriding the
    /// document default.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidTagOperation`] if the tag header is
    /// already finished.
    pub fn attr_escape(&self, key: &str, value: &str, do_escape: bool) -> Result<Tag, TagError> {
        let node = self.node.borrow();

        match node.state {
            TagState::Open => {}
            TagState::HasContent => {
                return Err(TagError::invalid(&node.name, InvalidTagReason::AttributesDone));
            }
            TagState::Closed => {
                return Err(TagError::invalid(&node.name, InvalidTagReason::AlreadyClosed));
            }
        }

        node.config.push(" ");
        node.config.push(key);
        node.config.push("=\"");
        node.config.push(&escape_if(value, do_escape));
        node.config.push("\"");

        Ok(self.clone())
    }

    /// Appends text content, escaped per the document default.
    ///
    /// On an `Open` tag a single call both finalizes the header and appends
    /// the first content line. Repeated calls accumulate in call order,
    /// interleaved with any children created in between; a live child
    /// subtree is force-closed first.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidTagOperation`] if the tag is already
    /// closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagstream::TagBuilder;
    ///
    /// let root = TagBuilder::new().create_root("ROOT");
    /// root.content("c0").unwrap();
    /// root.create_child("CH1").unwrap().content("c1").unwrap();
    /// root.content("c2").unwrap();
    ///
    /// assert_eq!(root.finish().unwrap(), "<ROOT>c0<CH1>c1</CH1>c2</ROOT>");
    /// ```
    pub fn content(&self, data: &str) -> Result<Tag, TagError> {
        let do_escape = self.node.borrow().config.default_escape;
        self.content_escape(data, do_escape)
    }

    /// Appends text content with an explicit escape flag overriding the
    /// document default.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidTagOperation`] if the tag is already
    /// closed.
    pub fn content_escape(&self, data: &str, do_escape: bool) -> Result<Tag, TagError> {
        {
            let mut node = self.node.borrow_mut();
            match node.state {
                TagState::Open => node.finish_header(),
                TagState::HasContent => {}
                TagState::Closed => {
                    return Err(TagError::invalid(&node.name, InvalidTagReason::AlreadyClosed));
                }
            }
        }

        close_descendants(&self.node)?;

        let node = self.node.borrow();
        node.config.indent(node.depth + 1);
        node.config.push(&escape_if(data, do_escape));
        node.config.line_break();

        Ok(self.clone())
    }

    /// Finishes the document and returns the complete markup string.
    ///
    /// May be called on any tag of the tree: the call delegates to the root,
    /// which force-closes its entire live descendant chain, closes itself
    /// and returns the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidTagOperation`] if the document was already
    /// finished.
    pub fn finish(&self) -> Result<String, TagError> {
        debug!("Finishing document at root '{}'", self.root.borrow().name);

        close_descendants(&self.root)?;
        self.root.borrow_mut().close()?;

        Ok(self.root.borrow().config.snapshot())
    }

    /// The tag name.
    pub fn name(&self) -> String {
        self.node.borrow().name.clone()
    }
}

/// The current state of the build: everything written to the buffer so far.
/// In most cases this is not yet a well-formed document. Nothing is closed
/// or otherwise mutated by taking the snapshot.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node.borrow().config.snapshot())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node.borrow();
        f.debug_struct("Tag")
            .field("name", &node.name)
            .field("state", &node.state)
            .field("depth", &node.depth)
            .finish()
    }
}
