//! Attributed document tree.
//!
//! A small tagged-variant tree: elements with ordered attributes, text,
//! and raw markup passed through from the source. Serializes to JSON as
//! `{"type": "element", "tag": ..., "attrs": {...}, "children": [...]}`.

use serde::{Serialize, Serializer, ser::SerializeMap};
use smallvec::SmallVec;
use std::fmt;

// ============================================================================
// Attrs
// ============================================================================

/// Ordered attribute list. Most elements carry zero to two attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(SmallVec<[(String, String); 2]>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key`, replacing an existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get("class").unwrap_or_default().split_ascii_whitespace()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Attrs {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for Attrs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ============================================================================
// Nodes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Box<Element>),
    Text { value: String },
    /// HTML/JSX copied verbatim from the source.
    Raw { value: String },
}

impl Node {
    pub fn element(element: Element) -> Self {
        Self::Element(Box::new(element))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn raw(value: impl Into<String>) -> Self {
        Self::Raw {
            value: value.into(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(elem) => Some(elem),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub children: SmallVec<[Node; 2]>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_attrs(tag, Attrs::new())
    }

    pub fn with_attrs(tag: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            children: SmallVec::new(),
        }
    }

    #[inline]
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Builder-style child append.
    pub fn child(mut self, node: Node) -> Self {
        self.push(node);
        self
    }

    /// Append a child, merging adjacent text (or adjacent raw) nodes.
    pub fn push(&mut self, node: Node) {
        let merged = match (self.children.last_mut(), &node) {
            (Some(Node::Text { value: last }), Node::Text { value })
            | (Some(Node::Raw { value: last }), Node::Raw { value }) => {
                last.push_str(value);
                true
            }
            _ => false,
        };
        if !merged {
            self.children.push(node);
        }
    }

    /// Concatenated text of all descendant text nodes, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text { value } => out.push_str(value),
                Node::Element(elem) => elem.collect_text(out),
                Node::Raw { .. } => {}
            }
        }
    }

    /// Visit this element and every descendant element, parents first.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(elem) = child {
                elem.walk_mut(f);
            }
        }
    }

    /// Visit this element and every descendant element, parents first.
    pub fn walk(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in &self.children {
            if let Node::Element(elem) = child {
                elem.walk(f);
            }
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// Default import making a component available to the tree's render scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDecl {
    pub default_name: String,
    pub source: String,
}

impl ImportDecl {
    pub fn new(default_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            default_name: default_name.into(),
            source: source.into(),
        }
    }
}

impl fmt::Display for ImportDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import {} from {:?};", self.default_name, self.source)
    }
}

/// One post body as a tree plus its top-level declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub declarations: Vec<ImportDecl>,
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            declarations: Vec::new(),
            root,
        }
    }

    pub fn has_declaration(&self, default_name: &str) -> bool {
        self.declarations
            .iter()
            .any(|decl| decl.default_name == default_name)
    }

    /// Number of elements with `tag` anywhere in the tree.
    pub fn count_tag(&self, tag: &str) -> usize {
        let mut count = 0;
        self.root.walk(&mut |elem| {
            if elem.is(tag) {
                count += 1;
            }
        });
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_set_replaces_in_place() {
        let mut attrs = Attrs::from([("class", "a"), ("id", "x")]);
        attrs.set("class", "b");
        assert_eq!(attrs.iter().collect::<Vec<_>>(), [("class", "b"), ("id", "x")]);
        assert!(attrs.has("id"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_classes() {
        let attrs = Attrs::from([("class", " language-rust  hljs ")]);
        assert_eq!(attrs.classes().collect::<Vec<_>>(), ["language-rust", "hljs"]);
        assert_eq!(Attrs::new().classes().count(), 0);
    }

    #[test]
    fn test_push_merges_text() {
        let mut elem = Element::new("p");
        elem.push(Node::text("a"));
        elem.push(Node::text("b"));
        elem.push(Node::raw("<br>"));
        elem.push(Node::raw("<br>"));
        elem.push(Node::text("c"));
        assert_eq!(
            elem.children.as_slice(),
            [Node::text("ab"), Node::raw("<br><br>"), Node::text("c")]
        );
    }

    #[test]
    fn test_text_content_nested() {
        let elem = Element::new("p")
            .child(Node::text("a "))
            .child(Node::element(Element::new("em").child(Node::text("b"))))
            .child(Node::raw("<x/>"))
            .child(Node::text(" c"));
        assert_eq!(elem.text_content(), "a b c");
    }

    #[test]
    fn test_walk_mut_visits_all() {
        let mut root = Element::new("article")
            .child(Node::element(
                Element::new("pre").child(Node::element(Element::new("code"))),
            ))
            .child(Node::element(Element::new("p")));
        let mut tags = Vec::new();
        root.walk_mut(&mut |elem| tags.push(elem.tag.clone()));
        assert_eq!(tags, ["article", "pre", "code", "p"]);
    }

    #[test]
    fn test_serialize_shape() {
        let doc = Document::new(
            Element::new("article").child(Node::element(
                Element::with_attrs("a", Attrs::from([("href", "/x")])).child(Node::text("x")),
            )),
        );
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "declarations": [],
                "root": {
                    "tag": "article",
                    "children": [{
                        "type": "element",
                        "tag": "a",
                        "attrs": {"href": "/x"},
                        "children": [{"type": "text", "value": "x"}]
                    }]
                }
            })
        );
    }

    #[test]
    fn test_import_decl_display() {
        let decl = ImportDecl::new("Pre", "~/components/pre");
        assert_eq!(decl.to_string(), r#"import Pre from "~/components/pre";"#);
        let json = serde_json::to_value(&decl).unwrap();
        assert_eq!(json["defaultName"], "Pre");
    }
}
