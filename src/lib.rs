/*!
 # tagstream

 A fluent, streaming builder for XML and XHTML documents. Callers assemble a
 tree of named elements with attributes and text content through an
 incremental API; the output is serialized into a buffer *while* the tree is
 built, so there is no DOM to walk afterwards and nothing to close by hand.

 ## Core concepts

 - **[`TagBuilder`]:** Collects the document-wide settings (declaration,
   indent width, default escape policy, line separator) and creates the root
   tag of a fresh document. Reusable: every root starts an independent
   document with its own buffer.
 - **[`Tag`]:** One element of the document. Exposes the builder operations:
   [`attr`](Tag::attr) while the tag header is open,
   [`create_child`](Tag::create_child) and [`content`](Tag::content) to fill
   the body, and [`finish`](Tag::finish) to terminate the whole document and
   take the result.
 - **Auto-closing:** A tag is closed implicitly — when its parent spawns a
   new child or appends content, the previous child subtree is force-closed
   deepest-first, and `finish` closes everything still live. Document order
   therefore always matches call order.
 - **[`TagError`]:** The single error kind, raised when an operation is no
   longer legal for a tag's lifecycle state.

 Attribute values and text content are passed through `quick-xml`'s entity
 escaping unless the document default or a per-call flag says otherwise.

 ## Getting started

```rust
use tagstream::{TagBuilder, TagError};

fn main() -> Result<(), TagError> {
    let builder = TagBuilder::new()
        .declaration("<!DOCTYPE html>")
        .indent_size(2)
        .line_separator("\n");

    let html = builder.create_root("html");
    let body = html.create_child("body")?;
    body.create_child("h1")?.content("Persons")?;
    body.create_child("p")?.content("A list of persons of interest.")?;

    let page = html.finish()?;

    assert_eq!(
        page,
        "<!DOCTYPE html>\n\
         <html>\n\
         \x20\x20<body>\n\
         \x20\x20\x20\x20<h1>\n\
         \x20\x20\x20\x20\x20\x20Persons\n\
         \x20\x20\x20\x20</h1>\n\
         \x20\x20\x20\x20<p>\n\
         \x20\x20\x20\x20\x20\x20A list of persons of interest.\n\
         \x20\x20\x20\x20</p>\n\
         \x20\x20</body>\n\
         </html>\n"
    );

    Ok(())
}
```

 ## Limits

 Tag and attribute names are written as given — the crate does not validate
 them, parse markup back, or offer DOM-style mutation. Handles are
 reference-counted and single-threaded; drive one document from one thread.
*/

pub mod builder;
mod config;
pub mod error;
pub mod tag;

pub use crate::builder::TagBuilder;
pub use crate::error::{InvalidTagReason, TagError};
pub use crate::tag::Tag;
