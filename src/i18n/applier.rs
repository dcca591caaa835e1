//! DOM text applier: rewrite an element's visible text without destroying
//! icons or nested tagged elements

use crate::{
    dom::{Document, NodeId},
    domain::constant::dom
};

/// How a direct child takes part in a node-preserving rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind<'a> {
    /// Plain character data
    TextNode(&'a str),
    /// An element with its own content key; translated by its own pass
    TaggedElementNode(&'a str),
    /// Anything else (icons, images, untagged wrappers)
    OtherNode
}

impl<'a> ChildKind<'a> {
    pub fn of(document: &'a Document, id: NodeId) -> Self {
        if let Some(content) = document.text(id) {
            return ChildKind::TextNode(content);
        }
        match document.attribute(id, dom::CONTENT_KEY_ATTR) {
            Some(key) => ChildKind::TaggedElementNode(key),
            None => ChildKind::OtherNode
        }
    }
}

/// Element-kind rule deciding where a replacement string is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `input`/`textarea` that takes free text: the `placeholder` attribute
    TextField,
    /// `option`: the whole text content
    SelectOption,
    /// `button`/`a`: node-preserving rewrite
    Interactive,
    /// Everything else, submit/button inputs included: the whole text content
    Plain
}

impl ElementKind {
    pub fn of(document: &Document, id: NodeId) -> Self {
        match document.tag_name(id) {
            Some("input") => {
                let kind = document.attribute(id, "type").map(str::to_ascii_lowercase);
                match kind.as_deref() {
                    Some("submit") | Some("button") => ElementKind::Plain,
                    _ => ElementKind::TextField
                }
            }
            Some("textarea") => ElementKind::TextField,
            Some("option") => ElementKind::SelectOption,
            Some("button") | Some("a") => ElementKind::Interactive,
            _ => ElementKind::Plain
        }
    }
}

/// Write `text` into `element` following its element-kind rule
pub fn apply_translation(document: &mut Document, element: NodeId, text: &str) {
    match ElementKind::of(document, element) {
        ElementKind::TextField => document.set_attribute(element, "placeholder", text),
        ElementKind::SelectOption | ElementKind::Plain => document.set_text_content(element, text),
        ElementKind::Interactive => {
            apply_preserving(document, element, text);
        }
    }
}

/// Node-preserving rewrite.
///
/// Every direct text child is overwritten with `text`; tagged and other element
/// children are left in place. When the element had no text child, a new
/// `text + " "` node is inserted as its first child. Returns the number of text
/// nodes that were overwritten.
pub fn apply_preserving(document: &mut Document, element: NodeId, text: &str) -> usize {
    let text_children: Vec<NodeId> = document
        .children(element)
        .iter()
        .copied()
        .filter(|child| matches!(ChildKind::of(document, *child), ChildKind::TextNode(_)))
        .collect();

    for child in &text_children {
        document.set_text(*child, text);
    }

    if text_children.is_empty() {
        let node = document.create_text(format!("{} ", text));
        // `element` is an element by construction of the caller; a text target simply gets no child
        let _ = document.prepend_child(element, node);
    }

    text_children.len()
}
