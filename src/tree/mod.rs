//! Document trees for post bodies.
//!
//! - `node` - tagged-variant tree (`Element`, `Text`, `Raw`) and `Document`
//! - `markdown` - pulldown-cmark body to tree conversion

pub mod markdown;
mod node;

pub use markdown::{MarkdownOptions, from_markdown};
pub use node::{Attrs, Document, Element, ImportDecl, Node};
