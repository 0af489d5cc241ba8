use std::collections::HashMap;

use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Tags whose text never counts as rendered content.
const NON_RENDERED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// A parsed page plus the page state that lives outside the markup: the
/// user's text selection, form-control values, and rich-text overwrites.
///
/// Form-control values sit beside the tree rather than inside it, the same
/// way a browser keeps a control's `value` property separate from its
/// markup. Writing through [`PageDocument::set_control_value`] therefore
/// cannot be undone or shadowed by anything in the document itself.
#[derive(Debug)]
pub struct PageDocument {
    html: Html,
    selection: Option<String>,
    control_values: HashMap<NodeId, String>,
    text_overrides: HashMap<NodeId, String>,
}

impl PageDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            selection: None,
            control_values: HashMap::new(),
            text_overrides: HashMap::new(),
        }
    }

    pub fn document(&self) -> &Html {
        &self.html
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn set_selection(&mut self, selection: Option<String>) {
        self.selection = selection.filter(|text| !text.is_empty());
    }

    /// Collects an element's rendered text in document order: whitespace
    /// collapsed, non-rendered subtrees skipped, rich-text overwrites
    /// shadowing the original markup.
    pub fn rendered_text(&self, element: ElementRef<'_>) -> String {
        if let Some(overwritten) = self.text_overrides.get(&element.id()) {
            return overwritten.clone();
        }
        let mut raw = String::new();
        collect_text(*element, &mut raw);
        collapse_whitespace(&raw)
    }

    /// Writes a form control's value through the property path.
    pub fn set_control_value(&mut self, node: NodeId, text: String) {
        self.control_values.insert(node, text);
    }

    pub fn control_value(&self, node: NodeId) -> Option<&str> {
        self.control_values.get(&node).map(String::as_str)
    }

    /// Replaces a rich-text container's plain-text content.
    pub fn set_inner_text(&mut self, node: NodeId, text: String) {
        self.text_overrides.insert(node, text);
    }
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            if NON_RENDERED_TAGS.contains(&element.name()) {
                return;
            }
            for child in node.children() {
                collect_text(child, out);
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}
