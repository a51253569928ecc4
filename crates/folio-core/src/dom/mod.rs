//! DOM abstraction.
//!
//! Renderers and effects are written against [`DomDocument`] and
//! [`DomNode`]. The browser runtime implements them over `web_sys`; the
//! [`memory`] module implements them in-process for tests and tooling.

pub mod memory;

use crate::error::Result;
use crate::geometry::Rect;

/// A handle to one element. Handles are cheap to clone and refer to the
/// same underlying element.
pub trait DomNode: Clone {
    /// Lowercase tag name.
    fn tag_name(&self) -> String;

    /// Replace all children with a single text node.
    fn set_text(&self, text: &str);

    /// Concatenated text of the element and its descendants.
    fn text(&self) -> String;

    /// Set an attribute.
    fn set_attribute(&self, name: &str, value: &str) -> Result<()>;

    /// Read an attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Append `child` as the last child.
    fn append_child(&self, child: &Self) -> Result<()>;

    /// Remove every child.
    fn clear_children(&self);

    /// Add a class to the class list. Adding twice is a no-op.
    fn add_class(&self, class: &str) -> Result<()>;

    /// Remove a class from the class list.
    fn remove_class(&self, class: &str) -> Result<()>;

    /// Whether the class list contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Set an inline style property (`opacity`, `transform`, ...).
    fn set_style(&self, property: &str, value: &str) -> Result<()>;

    /// Read an inline style property. Empty when unset.
    fn style(&self, property: &str) -> String;

    /// Bounding box in viewport coordinates.
    fn bounding_rect(&self) -> Rect;
}

/// A document: lookup and element creation.
pub trait DomDocument {
    /// Element handle type.
    type Node: DomNode;

    /// Look up an element by id.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First element matching a CSS selector.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// All elements matching a CSS selector, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Node>;

    /// Append a `<style>` element with `css` to the document head and
    /// return it.
    fn append_style_sheet(&self, css: &str) -> Result<Self::Node>;
}

/// Builder for a small element subtree.
///
/// ```ignore
/// let card = ElementBuilder::new("div")
///     .class("skill-card")
///     .child(ElementBuilder::new("h3").text("Rust"))
///     .build(&doc)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementBuilder {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<ElementBuilder>,
}

impl ElementBuilder {
    /// Start a new element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add a class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set text content. Ignored if children are also given.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Create the subtree in `doc`. The root is returned detached.
    pub fn build<D: DomDocument>(&self, doc: &D) -> Result<D::Node> {
        let node = doc.create_element(&self.tag)?;
        for class in &self.classes {
            node.add_class(class)?;
        }
        for (name, value) in &self.attributes {
            node.set_attribute(name, value)?;
        }
        if self.children.is_empty() {
            if let Some(text) = &self.text {
                node.set_text(text);
            }
        } else {
            for child in &self.children {
                node.append_child(&child.build(doc)?)?;
            }
        }
        Ok(node)
    }
}
