//! In-memory DOM.
//!
//! An arena of nodes behind `Rc<RefCell<_>>`, so handles are cheap clones
//! like browser element references. Used by tests and by anything that
//! wants the page markup without a browser.
//!
//! Slots are never reclaimed: a node detached by `clear_children` or
//! `set_text` stays in the arena so handles to it keep working. A document
//! grows with every re-render and is meant for short-lived pages.

use super::{DomDocument, DomNode};
use crate::error::{FolioError, Result};
use crate::geometry::Rect;
use crate::selector::{Selector, SelectorTarget};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type NodeId = usize;

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        styles: Vec<(String, String)>,
        rect: Rect,
    },
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
struct Arena {
    nodes: Vec<NodeData>,
}

impl Arena {
    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            styles: Vec::new(),
            rect: Rect::default(),
        })
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|c| *c != id);
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes[id].parent;
        }
        false
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in &self.nodes[id].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    fn preorder(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if matches!(self.nodes[id].kind, NodeKind::Element { .. }) {
            out.push(id);
            for child in &self.nodes[id].children {
                self.preorder(*child, out);
            }
        }
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Element {
                tag,
                attributes,
                styles,
                ..
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape(value, true)));
                }
                if !styles.is_empty() {
                    let inline: Vec<String> =
                        styles.iter().map(|(p, v)| format!("{p}: {v}")).collect();
                    out.push_str(&format!(" style=\"{}\"", escape(&inline.join("; "), true)));
                }
                out.push('>');
                for child in &self.nodes[id].children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }
}

fn escape(input: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// An in-memory document with `<html>`, `<head>` and `<body>`.
#[derive(Clone)]
pub struct MemoryDocument {
    arena: Rc<RefCell<Arena>>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("nodes", &self.node_count())
            .finish()
    }
}

impl MemoryDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::default();
        let root = arena.element("html");
        let head = arena.element("head");
        let body = arena.element("body");
        arena.attach(root, head);
        arena.attach(root, body);
        Self {
            arena: Rc::new(RefCell::new(arena)),
            root,
            head,
            body,
        }
    }

    fn node(&self, id: NodeId) -> MemoryNode {
        MemoryNode {
            arena: Rc::clone(&self.arena),
            id,
        }
    }

    /// The `<html>` element.
    #[must_use]
    pub fn document_element(&self) -> MemoryNode {
        self.node(self.root)
    }

    /// The `<head>` element.
    #[must_use]
    pub fn head(&self) -> MemoryNode {
        self.node(self.head)
    }

    /// The `<body>` element.
    #[must_use]
    pub fn body(&self) -> MemoryNode {
        self.node(self.body)
    }

    /// Serialize the whole document.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.document_element().outer_html()
    }

    /// Number of arena slots, detached nodes included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.arena.borrow().nodes.len()
    }
}

impl DomDocument for MemoryDocument {
    type Node = MemoryNode;

    fn element_by_id(&self, id: &str) -> Option<MemoryNode> {
        self.query_selector_all_parsed(&Selector::Id(id.to_string()))
            .into_iter()
            .next()
    }

    fn query_selector(&self, selector: &str) -> Option<MemoryNode> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<MemoryNode> {
        parse_or_warn(selector).map_or_else(Vec::new, |sel| self.query_selector_all_parsed(&sel))
    }

    fn create_element(&self, tag: &str) -> Result<MemoryNode> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(FolioError::Dom(format!("invalid tag name '{tag}'")));
        }
        let id = self.arena.borrow_mut().element(tag);
        Ok(self.node(id))
    }

    fn append_style_sheet(&self, css: &str) -> Result<MemoryNode> {
        let style = self.create_element("style")?;
        style.set_text(css);
        self.head().append_child(&style)?;
        Ok(style)
    }
}

/// Invalid selectors match nothing, like a caught `SyntaxError`.
fn parse_or_warn(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(selector, error = %e, "invalid selector");
            None
        }
    }
}

impl MemoryDocument {
    fn query_selector_all_parsed(&self, selector: &Selector) -> Vec<MemoryNode> {
        let mut ids = Vec::new();
        self.arena.borrow().preorder(self.root, &mut ids);
        ids.into_iter()
            .map(|id| self.node(id))
            .filter(|node| selector.matches(node))
            .collect()
    }
}

/// Handle to an element in a [`MemoryDocument`].
#[derive(Clone)]
pub struct MemoryNode {
    arena: Rc<RefCell<Arena>>,
    id: NodeId,
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena) && self.id == other.id
    }
}

impl Eq for MemoryNode {}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryNode({})", self.outer_html())
    }
}

impl MemoryNode {
    fn with_element<R>(
        &self,
        f: impl FnOnce(&str, &[(String, String)], &[(String, String)], Rect) -> R,
    ) -> R {
        let arena = self.arena.borrow();
        match &arena.nodes[self.id].kind {
            NodeKind::Element {
                tag,
                attributes,
                styles,
                rect,
            } => f(tag, attributes, styles, *rect),
            NodeKind::Text(_) => unreachable!("element handles never point at text nodes"),
        }
    }

    fn with_element_mut<R>(
        &self,
        f: impl FnOnce(&mut Vec<(String, String)>, &mut Vec<(String, String)>, &mut Rect) -> R,
    ) -> R {
        let mut arena = self.arena.borrow_mut();
        match &mut arena.nodes[self.id].kind {
            NodeKind::Element {
                attributes,
                styles,
                rect,
                ..
            } => f(attributes, styles, rect),
            NodeKind::Text(_) => unreachable!("element handles never point at text nodes"),
        }
    }

    fn class_list(&self) -> Vec<String> {
        self.attribute("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn write_class_list(&self, classes: &[String]) {
        let joined = classes.join(" ");
        self.with_element_mut(|attrs, _, _| set_pair(attrs, "class", &joined));
    }

    /// Element children in order.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        let arena = self.arena.borrow();
        arena.nodes[self.id]
            .children
            .iter()
            .filter(|id| matches!(arena.nodes[**id].kind, NodeKind::Element { .. }))
            .map(|id| Self {
                arena: Rc::clone(&self.arena),
                id: *id,
            })
            .collect()
    }

    /// Parent element.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let parent = self.arena.borrow().nodes[self.id].parent?;
        Some(Self {
            arena: Rc::clone(&self.arena),
            id: parent,
        })
    }

    /// Descendant elements matching a selector, in document order.
    #[must_use]
    pub fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        let Some(sel) = parse_or_warn(selector) else {
            return Vec::new();
        };
        let mut ids = Vec::new();
        self.arena.borrow().preorder(self.id, &mut ids);
        ids.into_iter()
            .skip(1)
            .map(|id| Self {
                arena: Rc::clone(&self.arena),
                id,
            })
            .filter(|node| sel.matches(node))
            .collect()
    }

    /// Set the box returned by [`DomNode::bounding_rect`].
    pub fn set_bounding_rect(&self, rect: Rect) {
        self.with_element_mut(|_, _, r| *r = rect);
    }

    /// Serialize this element and its subtree.
    #[must_use]
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.arena.borrow().write_html(self.id, &mut out);
        out
    }

    /// Serialize the subtree without this element's own tag.
    #[must_use]
    pub fn inner_html(&self) -> String {
        let arena = self.arena.borrow();
        let mut out = String::new();
        for child in &arena.nodes[self.id].children {
            arena.write_html(*child, &mut out);
        }
        out
    }
}

fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    if let Some(entry) = pairs.iter_mut().find(|(k, _)| k == key) {
        entry.1 = value.to_string();
    } else {
        pairs.push((key.to_string(), value.to_string()));
    }
}

impl DomNode for MemoryNode {
    fn tag_name(&self) -> String {
        self.with_element(|tag, _, _, _| tag.to_string())
    }

    fn set_text(&self, text: &str) {
        self.clear_children();
        let mut arena = self.arena.borrow_mut();
        if !text.is_empty() {
            let node = arena.push(NodeKind::Text(text.to_string()));
            arena.attach(self.id, node);
        }
    }

    fn text(&self) -> String {
        let mut out = String::new();
        self.arena.borrow().collect_text(self.id, &mut out);
        out
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || "\"'>/=".contains(c)) {
            return Err(FolioError::Dom(format!("invalid attribute name '{name}'")));
        }
        self.with_element_mut(|attrs, _, _| set_pair(attrs, name, value));
        Ok(())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.with_element(|_, attrs, _, _| {
            attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        })
    }

    fn append_child(&self, child: &Self) -> Result<()> {
        if !Rc::ptr_eq(&self.arena, &child.arena) {
            return Err(FolioError::Dom("node belongs to another document".into()));
        }
        let mut arena = self.arena.borrow_mut();
        if arena.is_ancestor_or_self(child.id, self.id) {
            return Err(FolioError::Dom("cannot append an ancestor".into()));
        }
        arena.attach(self.id, child.id);
        Ok(())
    }

    fn clear_children(&self) {
        let mut arena = self.arena.borrow_mut();
        let children = std::mem::take(&mut arena.nodes[self.id].children);
        for child in children {
            arena.nodes[child].parent = None;
        }
    }

    fn add_class(&self, class: &str) -> Result<()> {
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(FolioError::Dom(format!("invalid class token '{class}'")));
        }
        let mut classes = self.class_list();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.write_class_list(&classes);
        }
        Ok(())
    }

    fn remove_class(&self, class: &str) -> Result<()> {
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(FolioError::Dom(format!("invalid class token '{class}'")));
        }
        let mut classes = self.class_list();
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.write_class_list(&classes);
        }
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|c| c == class)
    }

    fn set_style(&self, property: &str, value: &str) -> Result<()> {
        if property.is_empty() {
            return Err(FolioError::Dom("empty style property".into()));
        }
        self.with_element_mut(|_, styles, _| {
            if value.is_empty() {
                styles.retain(|(p, _)| p != property);
            } else {
                set_pair(styles, property, value);
            }
        });
        Ok(())
    }

    fn style(&self, property: &str) -> String {
        self.with_element(|_, _, styles, _| {
            styles
                .iter()
                .find(|(p, _)| p == property)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        })
    }

    fn bounding_rect(&self) -> Rect {
        self.with_element(|_, _, _, rect| rect)
    }
}

impl SelectorTarget for MemoryNode {
    fn tag(&self) -> String {
        self.tag_name()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attribute(name)
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent()
    }
}
