//! Minimal document model
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by [`NodeId`].
//! A node keeps its id for the lifetime of the document, even after it is
//! detached, so node identity can be compared across mutations.

mod fixture;

pub use fixture::{NodeSpec, PageSpec};

use crate::domain::I18nError;

/// Stable handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A document node: either character data or an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(ElementData)
}

/// Element payload: tag name, attributes in insertion order and child handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    tag:        String,
    attributes: Vec<(String, String)>,
    children:   Vec<NodeId>
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self { tag: tag.to_ascii_lowercase(), attributes: Vec::new(), children: Vec::new() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string()))
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node:   Node,
    parent: Option<NodeId>
}

/// Arena-backed document with an `html` root and a `body` element
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    root:  NodeId,
    body:  NodeId
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut document = Self { slots: Vec::new(), root: NodeId(0), body: NodeId(0) };
        let root = document.create_element("html");
        let body = document.create_element("body");
        document.root = root;
        document.body = body;
        document.attach(root, body, None);
        document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::Element(ElementData::new(tag)))
    }

    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.push(Node::Text(content.into()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot { node, parent: None });
        id
    }

    /// The node behind `id`; `None` for ids minted by another document
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).map(|slot| &slot.node)
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        id.0 < self.slots.len()
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.node(id) {
            Some(Node::Element(element)) => Some(element),
            _ => None
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.slots.get_mut(id.0).map(|slot| &mut slot.node) {
            Some(Node::Element(element)) => Some(element),
            _ => None
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map(ElementData::children).unwrap_or(&[])
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::tag)
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id), Some(Node::Text(_)))
    }

    /// Character data of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.node(id) {
            Some(Node::Text(content)) => Some(content),
            _ => None
        }
    }

    // **********************
    // Tree mutation
    // **********************

    /// Append `child` as the last child of `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), I18nError> {
        self.check_insertion(parent, child)?;
        self.detach(child);
        self.attach(parent, child, None);
        Ok(())
    }

    /// Insert `child` before every existing child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), I18nError> {
        self.check_insertion(parent, child)?;
        self.detach(child);
        self.attach(parent, child, Some(0));
        Ok(())
    }

    /// Remove `child` from `parent`; returns whether it was a child
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let removed = match self.element_mut(parent) {
            Some(element) => {
                let before = element.children.len();
                element.children.retain(|c| *c != child);
                element.children.len() != before
            }
            None => false
        };
        if removed && let Some(slot) = self.slots.get_mut(child.0) {
            slot.parent = None;
        }
        removed
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<(), I18nError> {
        if !self.has_node(child) {
            return Err(I18nError::Document(format!("Node {:?} does not belong to this document", child)));
        }
        if self.element(parent).is_none() {
            return Err(I18nError::Document(format!("Node {:?} cannot have children", parent)));
        }
        if self.contains(child, parent) {
            return Err(I18nError::Document(format!("Node {:?} cannot be inserted into its own subtree", child)));
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.parent(child) {
            self.remove_child(parent, child);
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, position: Option<usize>) {
        if let Some(element) = self.element_mut(parent) {
            match position {
                Some(index) => element.children.insert(index, child),
                None => element.children.push(child)
            }
            if let Some(slot) = self.slots.get_mut(child.0) {
                slot.parent = Some(parent);
            }
        }
    }

    // **********************
    // Text
    // **********************

    /// Overwrite the character data of a text node; returns false for elements
    pub fn set_text(&mut self, id: NodeId, content: &str) -> bool {
        match self.slots.get_mut(id.0).map(|slot| &mut slot.node) {
            Some(Node::Text(existing)) => {
                *existing = content.to_string();
                true
            }
            _ => false
        }
    }

    /// Concatenated character data of the node and all of its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        match self.node(id) {
            Some(Node::Text(content)) => content.clone(),
            Some(Node::Element(element)) => element.children.iter().map(|child| self.text_content(*child)).collect(),
            None => String::new()
        }
    }

    /// Replace every child of an element with a single text node (none if `content` is empty)
    pub fn set_text_content(&mut self, id: NodeId, content: &str) {
        if self.set_text(id, content) {
            return;
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.remove_child(id, child);
        }
        if !content.is_empty() {
            let text = self.create_text(content);
            self.attach(id, text, None);
        }
    }

    // **********************
    // Attributes
    // **********************

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attribute(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.set_attribute(name, value);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class").is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.element(id).is_none() || self.has_class(id, class) {
            return;
        }
        let mut classes: Vec<String> = self.class_list(id);
        classes.push(class.to_string());
        self.set_attribute(id, "class", &classes.join(" "));
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let classes: Vec<String> = self.class_list(id).into_iter().filter(|c| c != class).collect();
        self.set_attribute(id, "class", &classes.join(" "));
    }

    /// Toggle a class; returns whether the class is present afterwards
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            self.has_class(id, class)
        }
    }

    /// Value of one declaration in the inline `style` attribute
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.style_declarations(id).into_iter().find(|(name, _)| name == property).map(|(_, value)| value)
    }

    /// Set one declaration in the inline `style` attribute, keeping the others in order
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        if self.element(id).is_none() {
            return;
        }
        let mut declarations = self.style_declarations(id);
        match declarations.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => declarations.push((property.to_string(), value.to_string()))
        }
        let style =
            declarations.iter().map(|(name, value)| format!("{}: {};", name, value)).collect::<Vec<_>>().join(" ");
        self.set_attribute(id, "style", &style);
    }

    fn style_declarations(&self, id: NodeId) -> Vec<(String, String)> {
        self.attribute(id, "style")
            .map(|style| {
                style
                    .split(';')
                    .filter_map(|declaration| declaration.split_once(':'))
                    .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
                    .filter(|(name, _)| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn class_list(&self, id: NodeId) -> Vec<String> {
        self.attribute(id, "class").map(|classes| classes.split_whitespace().map(str::to_string).collect()).unwrap_or_default()
    }

    // **********************
    // Queries
    // **********************

    /// Descendants of `id` in document (pre-)order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        found
    }

    /// Every connected element carrying `name`, in document order
    pub fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        let root = self.root;
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|id| self.has_attribute(*id, name))
            .collect()
    }

    /// First connected element whose `id` attribute equals `element_id`
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        let root = self.root;
        std::iter::once(root)
            .chain(self.descendants(root))
            .find(|id| self.attribute(*id, "id") == Some(element_id))
    }

    /// Inclusive containment: a node contains itself
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the node is reachable from the root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    /// Closest inclusive ancestor carrying `name`
    pub fn closest_with_attribute(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.has_attribute(node, name) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }
}
