//! Test harness for the portfolio page.
//!
//! Boots the real pipeline against an in-memory page, then simulates the
//! events the browser would deliver to the effects.

use crate::fixture::PageFixture;
use crate::stub::{StubIcons, StubSource};
use folio_core::dom::memory::{MemoryDocument, MemoryNode};
use folio_core::{
    Bootstrap, DataSource, DomDocument, DomNode, Effects, FolioError, IntersectionEntry, Point,
    Rect, RevealState, SiteConfig,
};
use futures::executor::block_on;

/// Test harness driving one page load.
pub struct PageHarness {
    doc: MemoryDocument,
    config: SiteConfig,
    icons: StubIcons,
    effects: Option<Effects<MemoryNode>>,
    error: Option<FolioError>,
    hovered: Vec<usize>,
}

impl PageHarness {
    /// Harness over the full page fixture.
    #[must_use]
    pub fn new() -> Self {
        Self::with_page(PageFixture::new().build())
    }

    /// Harness over a custom document.
    #[must_use]
    pub fn with_page(doc: MemoryDocument) -> Self {
        Self::with_config(doc, SiteConfig::default())
    }

    /// Harness over a custom document and configuration.
    #[must_use]
    pub fn with_config(doc: MemoryDocument, config: SiteConfig) -> Self {
        let icons = StubIcons::new(&doc, config.icon_attribute.clone());
        Self {
            doc,
            config,
            icons,
            effects: None,
            error: None,
            hovered: Vec::new(),
        }
    }

    // === Boot ===

    /// Mount the page with `source`.
    pub fn boot_with(&mut self, source: &impl DataSource) -> &mut Self {
        let bootstrap = Bootstrap::new(&self.doc, source, &self.icons, &self.config);
        match block_on(bootstrap.mount()) {
            Ok(effects) => {
                self.effects = Some(effects);
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Mount the page with a `200 OK` answer carrying `json`.
    pub fn boot_json(&mut self, json: &str) -> &mut Self {
        self.boot_with(&StubSource::ok(json))
    }

    /// Mount the page with a non-success status.
    pub fn boot_status(&mut self, status: u16) -> &mut Self {
        self.boot_with(&StubSource::status(status, "Not Found"))
    }

    /// Mount the page with a transport failure.
    pub fn boot_unreachable(&mut self) -> &mut Self {
        self.boot_with(&StubSource::unreachable("network down"))
    }

    /// Error from the last boot, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&FolioError> {
        self.error.as_ref()
    }

    /// Effects from the last successful boot.
    #[must_use]
    pub const fn effects(&self) -> Option<&Effects<MemoryNode>> {
        self.effects.as_ref()
    }

    /// Number of icon library invocations.
    #[must_use]
    pub fn icon_calls(&self) -> usize {
        self.icons.calls()
    }

    /// The underlying document.
    #[must_use]
    pub const fn document(&self) -> &MemoryDocument {
        &self.doc
    }

    // === Event Simulation ===

    /// Scroll the window to `y`.
    pub fn scroll_to(&mut self, y: f64) -> &mut Self {
        if let Some(navbar) = self.effects.as_ref().and_then(|e| e.navbar.as_ref()) {
            navbar.update(y);
        }
        self
    }

    /// Move the pointer to `client`. Cards under the pointer receive a
    /// move, cards the pointer just left receive a leave.
    pub fn move_pointer(&mut self, client: Point) -> &mut Self {
        let Some(effects) = &self.effects else {
            return self;
        };
        if let Some(glow) = &effects.glow {
            glow.track(client);
        }

        let mut now_hovered = Vec::new();
        for (idx, card) in effects.cards.iter().enumerate() {
            if card.element().bounding_rect().contains_point(&client) {
                card.on_pointer_move(client);
                now_hovered.push(idx);
            } else if self.hovered.contains(&idx) {
                card.on_pointer_leave();
            }
        }
        self.hovered = now_hovered;
        self
    }

    /// Give every element matching `selector` the box `rect`.
    pub fn layout(&mut self, selector: &str, rect: Rect) -> &mut Self {
        for node in self.doc.query_selector_all(selector) {
            node.set_bounding_rect(rect);
        }
        self
    }

    /// Deliver an observer entry for the first element matching `selector`,
    /// carrying the browser's `isIntersecting` flag as given. Only sections
    /// still observed get a callback.
    pub fn set_intersecting(&mut self, selector: &str, is_intersecting: bool) -> &mut Self {
        let Some(target) = self.doc.query_selector(selector) else {
            return self;
        };
        let Some(effects) = &mut self.effects else {
            return self;
        };
        if effects.reveal.pending().any(|n| *n == target) {
            effects.reveal.on_intersection(&[IntersectionEntry {
                target,
                is_intersecting,
            }]);
        }
        self
    }

    /// Scroll the first element matching `selector` to `ratio` visible.
    ///
    /// Models the callback the observer fires when the ratio crosses the
    /// configured threshold: the entry reports `isIntersecting` once
    /// `ratio` reaches the threshold. Smaller non-zero ratios, which a
    /// browser may still flag as intersecting on the initial callback, are
    /// reported as not intersecting; use [`Self::set_intersecting`] for
    /// those.
    pub fn set_visible(&mut self, selector: &str, ratio: f64) -> &mut Self {
        let Some(threshold) = self.effects.as_ref().map(|e| e.reveal.threshold()) else {
            return self;
        };
        self.set_intersecting(selector, ratio >= threshold)
    }

    // === Queries ===

    /// All elements matching `selector`.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<MemoryNode> {
        self.doc.query_selector_all(selector)
    }

    /// Text of the first element matching `selector`, empty if none.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.doc
            .query_selector(selector)
            .map(|n| n.text())
            .unwrap_or_default()
    }

    /// Texts of all elements matching `selector`, in document order.
    #[must_use]
    pub fn texts(&self, selector: &str) -> Vec<String> {
        self.query_all(selector).iter().map(DomNode::text).collect()
    }

    /// Whether anything matches `selector`.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.doc.query_selector(selector).is_some()
    }

    /// Reveal state of the first element matching `selector`.
    #[must_use]
    pub fn reveal_state(&self, selector: &str) -> Option<RevealState> {
        let node = self.doc.query_selector(selector)?;
        self.effects.as_ref()?.reveal.state_of(&node)
    }

    // === Assertions ===

    /// Assert that an element exists.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected element matching '{selector}' to exist"
        );
        self
    }

    /// Assert that no element matches.
    ///
    /// # Panics
    ///
    /// Panics if something matches.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected element matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching elements.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} elements matching '{selector}' but found {actual}"
        );
        self
    }

    /// Assert that the first match carries `class`.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches or the class is missing.
    pub fn assert_class(&self, selector: &str, class: &str) -> &Self {
        let node = self
            .doc
            .query_selector(selector)
            .unwrap_or_else(|| panic!("Expected element matching '{selector}' to exist"));
        assert!(
            node.has_class(class),
            "Expected '{selector}' to have class '{class}'"
        );
        self
    }

    /// Assert that the first match does not carry `class`.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches or the class is present.
    pub fn assert_no_class(&self, selector: &str, class: &str) -> &Self {
        let node = self
            .doc
            .query_selector(selector)
            .unwrap_or_else(|| panic!("Expected element matching '{selector}' to exist"));
        assert!(
            !node.has_class(class),
            "Expected '{selector}' not to have class '{class}'"
        );
        self
    }

    /// Assert an inline style value on the first match.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches or the value differs.
    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> &Self {
        let actual = self
            .doc
            .query_selector(selector)
            .map(|n| n.style(property))
            .unwrap_or_else(|| panic!("Expected element matching '{selector}' to exist"));
        assert_eq!(
            actual, expected,
            "Expected {property} '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }
}

impl Default for PageHarness {
    fn default() -> Self {
        Self::new()
    }
}
