//! `web_sys` implementation of the DOM traits.
//!
//! [`DomNode`] is implemented directly on [`web_sys::Element`]; handles are
//! JS references, so clones and equality follow element identity.

use folio_core::{DomDocument, DomNode, FolioError, Rect, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, Node};

/// Readable text for a thrown JS value.
pub(crate) fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) fn dom_error(value: JsValue) -> FolioError {
    FolioError::Dom(js_error(&value))
}

/// Inline style of an HTML element. Other elements (SVG) have none here.
fn inline_style(element: &Element) -> Result<CssStyleDeclaration> {
    element
        .dyn_ref::<HtmlElement>()
        .map(HtmlElement::style)
        .ok_or_else(|| {
            FolioError::Dom(format!(
                "<{}> has no inline style",
                element.tag_name().to_ascii_lowercase()
            ))
        })
}

impl DomNode for Element {
    fn tag_name(&self) -> String {
        Element::tag_name(self).to_ascii_lowercase()
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        Element::set_attribute(self, name, value).map_err(dom_error)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn append_child(&self, child: &Self) -> Result<()> {
        Node::append_child(self, child)
            .map(|_| ())
            .map_err(dom_error)
    }

    fn clear_children(&self) {
        self.set_inner_html("");
    }

    fn add_class(&self, class: &str) -> Result<()> {
        self.class_list().add_1(class).map_err(dom_error)
    }

    fn remove_class(&self, class: &str) -> Result<()> {
        self.class_list().remove_1(class).map_err(dom_error)
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_style(&self, property: &str, value: &str) -> Result<()> {
        inline_style(self)?
            .set_property(property, value)
            .map_err(dom_error)
    }

    fn style(&self, property: &str) -> String {
        inline_style(self)
            .ok()
            .and_then(|s| s.get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn bounding_rect(&self) -> Rect {
        let rect = self.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }
}

/// The live browser document.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    /// Wrap a document.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    /// The document of the current window.
    pub fn current() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| FolioError::Dom("no document".into()))?;
        Ok(Self::new(document))
    }

    /// The wrapped `web_sys` document.
    #[must_use]
    pub const fn inner(&self) -> &Document {
        &self.document
    }
}

impl DomDocument for WebDocument {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(selector, error = %js_error(&e), "invalid selector");
                None
            }
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(selector, error = %js_error(&e), "invalid selector");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn create_element(&self, tag: &str) -> Result<Element> {
        self.document.create_element(tag).map_err(dom_error)
    }

    fn append_style_sheet(&self, css: &str) -> Result<Element> {
        let head = self
            .document
            .head()
            .ok_or_else(|| FolioError::MissingElement("head".into()))?;
        let style = self.create_element("style")?;
        style.set_text_content(Some(css));
        Node::append_child(&head, &style).map_err(dom_error)?;
        Ok(style)
    }
}
