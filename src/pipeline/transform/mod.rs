//! Code block transforms.
//!
//! A code block is a `pre` element whose only child is a `code` element.
//! Any other `pre` shape is left alone by every transform here.

mod extract;
mod grammar;
mod highlight;
mod relabel;

pub use extract::ExtractCode;
pub use highlight::{Highlight, Highlighter, PlainHighlighter, TokenHighlighter};
pub use relabel::RelabelCode;

use crate::tree::Element;

/// Exact fenced source of a code block, set on the `pre` element.
pub const RAW_CODE_ATTR: &str = "rawCode";

/// Fence language of a code block, set on the `pre` element.
pub const LANGUAGE_ATTR: &str = "language";

const LANGUAGE_CLASS_PREFIX: &str = "language-";

/// The `code` child of a regular code block.
pub(crate) fn code_child(pre: &Element) -> Option<&Element> {
    if !pre.is("pre") || pre.children.len() != 1 {
        return None;
    }
    pre.children[0].as_element().filter(|code| code.is("code"))
}

pub(crate) fn code_child_mut(pre: &mut Element) -> Option<&mut Element> {
    if !pre.is("pre") || pre.children.len() != 1 {
        return None;
    }
    pre.children[0].as_element_mut().filter(|code| code.is("code"))
}

/// Language named by the first `language-*` class of a `code` element.
pub fn language_of(code: &Element) -> Option<&str> {
    code.attrs
        .classes()
        .find_map(|class| class.strip_prefix(LANGUAGE_CLASS_PREFIX))
        .filter(|language| !language.is_empty())
}
