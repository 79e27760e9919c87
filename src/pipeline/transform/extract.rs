//! First pass: capture the fenced source before anything restyles it.

use super::{LANGUAGE_ATTR, RAW_CODE_ATTR, code_child, language_of};
use crate::{
    debug,
    pipeline::Transform,
    tree::{Document, Element},
};

/// Copies each code block's text and language onto its `pre` element.
pub struct ExtractCode;

impl Transform for ExtractCode {
    fn transform(self, mut doc: Document) -> Document {
        doc.root.walk_mut(&mut extract);
        doc
    }
}

fn extract(elem: &mut Element) {
    if !elem.is("pre") {
        return;
    }
    let Some(code) = code_child(elem) else {
        debug!("compile"; "skipping pre without a single code child");
        return;
    };

    let raw = code.text_content();
    let language = language_of(code).map(str::to_string);

    elem.attrs.set(RAW_CODE_ATTR, raw);
    if let Some(language) = language {
        elem.attrs.set(LANGUAGE_ATTR, language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use crate::tree::{Attrs, Node};

    fn run(root: Element) -> Element {
        Pipeline::new(Document::new(root))
            .pipe(ExtractCode)
            .into_inner()
            .root
    }

    fn block(class: Option<&str>, text: &str) -> Node {
        let code = match class {
            Some(class) => Element::with_attrs("code", Attrs::from([("class", class)])),
            None => Element::new("code"),
        };
        Node::element(Element::new("pre").child(Node::element(code.child(Node::text(text)))))
    }

    #[test]
    fn test_extract_with_language() {
        let root = run(Element::new("article").child(block(Some("language-rust"), "fn main() {}\n")));
        let pre = root.children[0].as_element().unwrap();
        assert_eq!(pre.attrs.get(RAW_CODE_ATTR), Some("fn main() {}\n"));
        assert_eq!(pre.attrs.get(LANGUAGE_ATTR), Some("rust"));
        assert!(pre.is("pre"));
    }

    #[test]
    fn test_extract_without_language() {
        let root = run(Element::new("article").child(block(None, "plain")));
        let pre = root.children[0].as_element().unwrap();
        assert_eq!(pre.attrs.get(RAW_CODE_ATTR), Some("plain"));
        assert!(!pre.attrs.has(LANGUAGE_ATTR));
    }

    #[test]
    fn test_extract_nested_text() {
        let code = Element::new("code")
            .child(Node::text("let "))
            .child(Node::element(Element::new("span").child(Node::text("x"))));
        let pre = Element::new("pre").child(Node::element(code));
        let root = run(Element::new("div").child(Node::element(
            Element::new("blockquote").child(Node::element(pre)),
        )));

        let quote = root.children[0].as_element().unwrap();
        let pre = quote.children[0].as_element().unwrap();
        assert_eq!(pre.attrs.get(RAW_CODE_ATTR), Some("let x"));
    }

    #[test]
    fn test_irregular_blocks_untouched() {
        let two_children = Element::new("pre")
            .child(Node::element(Element::new("code")))
            .child(Node::element(Element::new("code")));
        let non_code = Element::new("pre").child(Node::element(Element::new("span")));
        let empty = Element::new("pre");

        let root = run(
            Element::new("article")
                .child(Node::element(two_children.clone()))
                .child(Node::element(non_code.clone()))
                .child(Node::element(empty.clone())),
        );

        let expected = [two_children, non_code, empty];
        for (node, expected) in root.children.iter().zip(expected) {
            assert_eq!(node.as_element(), Some(&expected));
        }
    }
}
