//! Markdown to tree conversion using pulldown-cmark.
//!
//! Fenced code blocks become `pre > code[class="language-X"] > text`, the
//! shape the code block transforms look for. HTML and JSX blocks are kept
//! as [`Node::Raw`].

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::{Attrs, Document, Element, Node};

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
    /// Enable `$inline$` and `$$display$$` math
    pub math: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
            math: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        if self.math {
            opts.insert(Options::ENABLE_MATH);
        }
        opts
    }
}

/// Markdown to tree converter
struct MarkdownConverter {
    /// Stack of open elements (for nested structures)
    stack: Vec<Element>,
    root: Element,
    /// Inside the header row of a table (cells become `th`)
    in_table_head: bool,
}

impl MarkdownConverter {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: Element::new("article"),
            in_table_head: false,
        }
    }

    fn convert(mut self, markdown: &str, options: &MarkdownOptions) -> Document {
        let parser = Parser::new_ext(markdown, options.to_pulldown_options());

        for event in parser {
            self.handle_event(event);
        }

        // Close anything left open by unbalanced input
        while let Some(elem) = self.stack.pop() {
            self.add_node(Node::element(elem));
        }
        Document::new(self.root)
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(text.as_ref()),
            Event::Code(code) => self.add_inline_code(code.as_ref()),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.add_node(Node::raw(html.to_string()));
            }
            Event::SoftBreak => self.add_text("\n"),
            Event::HardBreak => self.add_node(Node::element(Element::new("br"))),
            Event::Rule => self.add_node(Node::element(Element::new("hr"))),
            Event::FootnoteReference(name) => self.add_footnote_ref(name.as_ref()),
            Event::TaskListMarker(checked) => self.add_task_marker(checked),
            Event::InlineMath(math) => self.add_math(math.as_ref(), false),
            Event::DisplayMath(math) => self.add_math(math.as_ref(), true),
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            // Transparent: contents go to the enclosing element
            Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::CodeBlock(kind) => {
                let code_attrs = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let lang = info.split_ascii_whitespace().next().unwrap_or_default();
                        if lang.is_empty() {
                            Attrs::new()
                        } else {
                            Attrs::from([("class", format!("language-{lang}").as_str())])
                        }
                    }
                    CodeBlockKind::Indented => Attrs::new(),
                };
                self.stack.push(Element::new("pre"));
                self.stack.push(Element::with_attrs("code", code_attrs));
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.stack.push(Element::new("thead"));
            }
            tag => {
                let (name, attrs) = tag_to_element(&tag, self.in_table_head);
                self.stack.push(Element::with_attrs(name, attrs));
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::CodeBlock => {
                self.pop_into_parent(); // code
                self.pop_into_parent(); // pre
            }
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.pop_into_parent();
            }
            _ => self.pop_into_parent(),
        }
    }

    fn pop_into_parent(&mut self) {
        if let Some(elem) = self.stack.pop() {
            self.add_node(Node::element(elem));
        }
    }

    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.add_node(Node::text(text));
    }

    fn add_inline_code(&mut self, code: &str) {
        self.add_node(Node::element(Element::new("code").child(Node::text(code))));
    }

    fn add_footnote_ref(&mut self, name: &str) {
        let href = format!("#fn-{name}");
        let id = format!("fnref-{name}");
        let attrs = Attrs::from([("href", href.as_str()), ("id", id.as_str())]);
        let link = Element::with_attrs("a", attrs).child(Node::text(format!("[{name}]")));
        let sup = Element::with_attrs("sup", Attrs::from([("class", "footnote-ref")]))
            .child(Node::element(link));
        self.add_node(Node::element(sup));
    }

    fn add_task_marker(&mut self, checked: bool) {
        let mut attrs = Attrs::from([("type", "checkbox"), ("disabled", "")]);
        if checked {
            attrs.set("checked", "");
        }
        self.add_node(Node::element(Element::with_attrs("input", attrs)));
    }

    fn add_math(&mut self, formula: &str, display: bool) {
        let (tag, class) = if display {
            ("div", "math math-display")
        } else {
            ("span", "math math-inline")
        };
        let elem =
            Element::with_attrs(tag, Attrs::from([("class", class)])).child(Node::text(formula));
        self.add_node(Node::element(elem));
    }

    /// Add a node to current context (top of stack or root)
    fn add_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(elem) => elem.push(node),
            None => self.root.push(node),
        }
    }
}

/// Convert pulldown-cmark Tag to (tag_name, attributes)
fn tag_to_element(tag: &Tag, in_table_head: bool) -> (&'static str, Attrs) {
    match tag {
        // Block elements
        Tag::Paragraph => ("p", Attrs::new()),
        Tag::Heading { level, id, .. } => {
            let attrs = id
                .as_ref()
                .map(|id| Attrs::from([("id", id.as_ref())]))
                .unwrap_or_default();
            (heading_level_to_tag(*level), attrs)
        }
        Tag::BlockQuote(_) => ("blockquote", Attrs::new()),
        Tag::List(Some(start)) if *start != 1 => {
            ("ol", Attrs::from([("start", start.to_string().as_str())]))
        }
        Tag::List(Some(_)) => ("ol", Attrs::new()),
        Tag::List(None) => ("ul", Attrs::new()),
        Tag::Item => ("li", Attrs::new()),
        Tag::FootnoteDefinition(name) => (
            "div",
            Attrs::from([("class", "footnote"), ("id", format!("fn-{name}").as_str())]),
        ),

        // Table elements
        Tag::Table(_) => ("table", Attrs::new()),
        Tag::TableHead => ("thead", Attrs::new()),
        Tag::TableRow => ("tr", Attrs::new()),
        Tag::TableCell if in_table_head => ("th", Attrs::new()),
        Tag::TableCell => ("td", Attrs::new()),

        // Inline elements
        Tag::Emphasis => ("em", Attrs::new()),
        Tag::Strong => ("strong", Attrs::new()),
        Tag::Strikethrough => ("del", Attrs::new()),
        Tag::Superscript => ("sup", Attrs::new()),
        Tag::Subscript => ("sub", Attrs::new()),
        Tag::Link {
            dest_url, title, ..
        } => {
            let mut attrs = Attrs::from([("href", dest_url.as_ref())]);
            if !title.is_empty() {
                attrs.set("title", title.to_string());
            }
            ("a", attrs)
        }
        Tag::Image {
            dest_url, title, ..
        } => {
            let mut attrs = Attrs::from([("src", dest_url.as_ref())]);
            if !title.is_empty() {
                attrs.set("title", title.to_string());
            }
            // alt text is added as children (text content)
            ("img", attrs)
        }

        // Definition list (extended syntax)
        Tag::DefinitionList => ("dl", Attrs::new()),
        Tag::DefinitionListTitle => ("dt", Attrs::new()),
        Tag::DefinitionListDefinition => ("dd", Attrs::new()),

        // Handled by the converter before reaching here
        Tag::CodeBlock(_) => ("pre", Attrs::new()),
        Tag::HtmlBlock | Tag::MetadataBlock(_) => ("div", Attrs::new()),
    }
}

fn heading_level_to_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Convert a markdown body to a tree
pub fn from_markdown(markdown: &str, options: &MarkdownOptions) -> Document {
    MarkdownConverter::new().convert(markdown, options)
}
