//! Final pass: hand code blocks over to the rendering component.

use super::RAW_CODE_ATTR;
use crate::{
    config::CodeConfig,
    pipeline::Transform,
    tree::{Document, ImportDecl},
};

/// Renames extracted `pre` elements to `component` and declares its import.
///
/// The import is added once per document, whether or not any block was
/// relabeled, so the render scope always has the component.
pub struct RelabelCode {
    component: String,
    import_source: String,
}

impl RelabelCode {
    pub fn new(component: impl Into<String>, import_source: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            import_source: import_source.into(),
        }
    }

    pub fn from_config(config: &CodeConfig) -> Self {
        Self::new(&config.component, &config.import_source)
    }
}

impl Transform for RelabelCode {
    fn transform(self, mut doc: Document) -> Document {
        doc.root.walk_mut(&mut |elem| {
            if elem.is("pre") && elem.attrs.has(RAW_CODE_ATTR) {
                elem.tag.clone_from(&self.component);
            }
        });

        if !doc.has_declaration(&self.component) {
            doc.declarations
                .push(ImportDecl::new(self.component, self.import_source));
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{ExtractCode, Pipeline};
    use crate::tree::{Element, Node};

    fn pre(text: &str) -> Node {
        Node::element(
            Element::new("pre").child(Node::element(Element::new("code").child(Node::text(text)))),
        )
    }

    fn compile(root: Element) -> Document {
        Pipeline::new(Document::new(root))
            .pipe(ExtractCode)
            .pipe(RelabelCode::from_config(&CodeConfig::default()))
            .into_inner()
    }

    #[test]
    fn test_single_import_for_many_blocks() {
        let doc = compile(Element::new("article").child(pre("a")).child(pre("b")).child(pre("c")));
        assert_eq!(doc.count_tag("Pre"), 3);
        assert_eq!(doc.count_tag("pre"), 0);
        assert_eq!(doc.declarations, [ImportDecl::new("Pre", "~/components/pre")]);
    }

    #[test]
    fn test_import_without_blocks() {
        let doc = compile(Element::new("article").child(Node::text("prose")));
        assert_eq!(doc.declarations.len(), 1);
    }

    #[test]
    fn test_irregular_pre_keeps_tag() {
        let irregular = Element::new("pre").child(Node::text("bare"));
        let doc = compile(Element::new("article").child(Node::element(irregular)));
        assert_eq!(doc.count_tag("pre"), 1);
        assert_eq!(doc.count_tag("Pre"), 0);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let doc = compile(Element::new("article").child(pre("a")));
        let again = RelabelCode::from_config(&CodeConfig::default()).transform(doc.clone());
        assert_eq!(again, doc);
    }
}
