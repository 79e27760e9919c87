//! Syntax highlighting of code block contents.
//!
//! Only the `code` element's children and class change. The enclosing
//! `pre` keeps the attributes set by [`ExtractCode`](super::ExtractCode).

use super::{LANGUAGE_ATTR, code_child_mut, grammar::grammar_for, language_of};
use crate::{
    pipeline::Transform,
    tree::{Attrs, Document, Element, Node},
};

const HLJS_CLASS: &str = "hljs";

/// Produces styled children for a code block.
pub trait Highlighter: Sync {
    /// Styled replacement for `code`, or `None` to leave it as is.
    fn highlight(&self, code: &str, language: &str) -> Option<Vec<Node>>;
}

/// Leaves every block unstyled.
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, _code: &str, _language: &str) -> Option<Vec<Node>> {
        None
    }
}

/// Regex tokenizer emitting `span.hljs-*` elements for known languages.
pub struct TokenHighlighter;

impl Highlighter for TokenHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Option<Vec<Node>> {
        let grammar = grammar_for(language)?;
        let nodes = grammar
            .tokenize(code)
            .into_iter()
            .map(|(kind, text)| match kind {
                Some(kind) => Node::element(
                    Element::with_attrs("span", Attrs::from([("class", kind.class())]))
                        .child(Node::text(text)),
                ),
                None => Node::text(text),
            })
            .collect();
        Some(nodes)
    }
}

/// Highlight every regular code block with `H`.
pub struct Highlight<H> {
    highlighter: H,
}

impl<H: Highlighter> Highlight<H> {
    pub fn new(highlighter: H) -> Self {
        Self { highlighter }
    }

    fn apply(&self, elem: &mut Element) {
        let language = elem.attrs.get(LANGUAGE_ATTR).map(str::to_string);
        let Some(code) = code_child_mut(elem) else {
            return;
        };
        let Some(language) = language.or_else(|| language_of(code).map(str::to_string)) else {
            return;
        };
        let Some(nodes) = self.highlighter.highlight(&code.text_content(), &language) else {
            return;
        };

        code.children.clear();
        for node in nodes {
            code.push(node);
        }
        if !code.attrs.classes().any(|class| class == HLJS_CLASS) {
            let class = match code.attrs.get("class") {
                Some(existing) if !existing.trim().is_empty() => format!("{existing} {HLJS_CLASS}"),
                _ => HLJS_CLASS.to_string(),
            };
            code.attrs.set("class", class);
        }
    }
}

impl<H: Highlighter> Transform for Highlight<H> {
    fn transform(self, mut doc: Document) -> Document {
        doc.root.walk_mut(&mut |elem| self.apply(elem));
        doc
    }
}
