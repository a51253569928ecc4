//! Interaction effects.
//!
//! [`Effects::init`] runs once after the sections exist and collects four
//! independent behaviors. Each behavior owns the elements it writes and
//! exposes the reaction to one kind of host event; the host (browser
//! runtime or test harness) decides how events reach it.
//!
//! | Behavior          | Event                         | Writes                      |
//! |-------------------|-------------------------------|-----------------------------|
//! | [`CursorGlow`]    | pointer move on the document  | glow `left`/`top`           |
//! | [`NavbarScroll`]  | window scroll                 | navbar `scrolled` class     |
//! | [`RevealTracker`] | viewport intersection         | section `revealed` class    |
//! | [`MagneticCard`]  | pointer move/leave on a card  | card `transform`            |
//!
//! None of these report errors: a failed style write is logged and
//! dropped.

use crate::config::{EffectsConfig, SiteConfig};
use crate::dom::{DomDocument, DomNode};
use crate::geometry::{Point, Rect};

/// Navbar class while the page is scrolled past the threshold.
pub const SCROLLED_CLASS: &str = "scrolled";
/// Section class once revealed.
pub const REVEALED_CLASS: &str = "revealed";
/// Marker attribute on the injected reveal `<style>`.
pub const REVEAL_STYLE_ATTRIBUTE: &str = "data-folio-reveal";

fn log_dom<T>(what: &str, result: crate::Result<T>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "{what} failed");
    }
}

/// CSS numbers the way the browser's own templating prints them: no `-0`.
fn css_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}")
}

// =============================================================================
// Cursor glow
// =============================================================================

/// Keeps the glow element under the pointer.
#[derive(Debug, Clone)]
pub struct CursorGlow<N> {
    element: N,
}

impl<N: DomNode> CursorGlow<N> {
    /// Wrap the glow element.
    pub const fn new(element: N) -> Self {
        Self { element }
    }

    /// The glow element.
    pub const fn element(&self) -> &N {
        &self.element
    }

    /// Move the glow to the pointer's viewport position.
    pub fn track(&self, client: Point) {
        log_dom(
            "glow left",
            self.element.set_style("left", &format!("{}px", css_number(client.x))),
        );
        log_dom(
            "glow top",
            self.element.set_style("top", &format!("{}px", css_number(client.y))),
        );
    }
}

// =============================================================================
// Navbar scroll state
// =============================================================================

/// Toggles the navbar's `scrolled` class from the scroll offset.
#[derive(Debug, Clone)]
pub struct NavbarScroll<N> {
    navbar: N,
    threshold: f64,
}

impl<N: DomNode> NavbarScroll<N> {
    /// Wrap the navbar element.
    pub const fn new(navbar: N, threshold: f64) -> Self {
        Self { navbar, threshold }
    }

    /// Whether `scroll_y` counts as scrolled. Strictly greater than the
    /// threshold.
    #[must_use]
    pub fn is_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }

    /// Re-evaluate the class for the current offset. Returns the new state.
    pub fn update(&self, scroll_y: f64) -> bool {
        let scrolled = self.is_scrolled(scroll_y);
        if scrolled {
            log_dom("navbar add class", self.navbar.add_class(SCROLLED_CLASS));
        } else {
            log_dom("navbar remove class", self.navbar.remove_class(SCROLLED_CLASS));
        }
        scrolled
    }
}

// =============================================================================
// Reveal on scroll
// =============================================================================

/// Per-section reveal state. `Revealed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Faded out and offset, still observed.
    Hidden,
    /// Visible, no longer observed.
    Revealed,
}

/// One observer callback entry.
#[derive(Debug, Clone)]
pub struct IntersectionEntry<N> {
    /// Observed element.
    pub target: N,
    /// Whether the element crossed into the viewport at the threshold.
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
struct Tracked<N> {
    node: N,
    state: RevealState,
}

/// Arena of sections watched for the one-shot reveal.
#[derive(Debug, Clone)]
pub struct RevealTracker<N> {
    sections: Vec<Tracked<N>>,
    threshold: f64,
}

impl<N: DomNode + PartialEq> RevealTracker<N> {
    /// Track `sections`, hiding each one. A section that already carries
    /// the revealed class (from an earlier mount) stays revealed.
    pub fn new(sections: Vec<N>, config: &EffectsConfig) -> Self {
        let sections = sections
            .into_iter()
            .map(|node| {
                let state = if node.has_class(REVEALED_CLASS) {
                    RevealState::Revealed
                } else {
                    hide_section(&node, config);
                    RevealState::Hidden
                };
                Tracked { node, state }
            })
            .collect();
        Self {
            sections,
            threshold: config.reveal_threshold,
        }
    }

    /// Visible fraction the observer should fire at.
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of tracked sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no section is tracked.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections still hidden, i.e. the ones to observe.
    pub fn pending(&self) -> impl Iterator<Item = &N> {
        self.sections
            .iter()
            .filter(|t| t.state == RevealState::Hidden)
            .map(|t| &t.node)
    }

    /// Every tracked section, in document order.
    pub fn sections(&self) -> impl Iterator<Item = &N> {
        self.sections.iter().map(|t| &t.node)
    }

    /// State of `node`, if tracked.
    pub fn state_of(&self, node: &N) -> Option<RevealState> {
        self.sections
            .iter()
            .find(|t| &t.node == node)
            .map(|t| t.state)
    }

    /// Handle an observer callback. Intersecting hidden sections are
    /// revealed; the returned nodes must be unobserved.
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry<N>]) -> Vec<N> {
        let mut revealed = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(tracked) = self
                .sections
                .iter_mut()
                .find(|t| t.node == entry.target && t.state == RevealState::Hidden)
            else {
                continue;
            };
            log_dom("reveal section", tracked.node.add_class(REVEALED_CLASS));
            tracked.state = RevealState::Revealed;
            revealed.push(tracked.node.clone());
        }
        if !revealed.is_empty() {
            tracing::debug!(count = revealed.len(), "revealed sections");
        }
        revealed
    }
}

fn hide_section<N: DomNode>(section: &N, config: &EffectsConfig) {
    log_dom("hide section", section.set_style("opacity", "0"));
    log_dom(
        "offset section",
        section.set_style(
            "transform",
            &format!("translateY({}px)", css_number(config.reveal_offset)),
        ),
    );
    log_dom(
        "section transition",
        section.set_style("transition", &config.reveal_transition),
    );
}

/// Inject the reveal rule once per document. Later mounts find the marked
/// `<style>` and leave it alone.
fn install_reveal_style<D: DomDocument>(doc: &D, section_selector: &str) {
    if doc
        .query_selector(&format!("style[{REVEAL_STYLE_ATTRIBUTE}]"))
        .is_some()
    {
        return;
    }
    log_dom(
        "reveal style sheet",
        doc.append_style_sheet(&reveal_style_sheet(section_selector))
            .and_then(|sheet| sheet.set_attribute(REVEAL_STYLE_ATTRIBUTE, "")),
    );
}

/// Style rule that overrides the inline hidden styles once a section is
/// revealed.
#[must_use]
pub fn reveal_style_sheet(section_selector: &str) -> String {
    format!(
        "{section_selector}.{REVEALED_CLASS} {{ opacity: 1 !important; transform: translateY(0) !important; }}"
    )
}

// =============================================================================
// Magnetic tilt
// =============================================================================

/// A 3D tilt: rotations in degrees, lift in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltTransform {
    /// Perspective distance (px).
    pub perspective: f64,
    /// Rotation around the X axis (deg).
    pub rotate_x: f64,
    /// Rotation around the Y axis (deg).
    pub rotate_y: f64,
    /// Upward lift (px).
    pub lift: f64,
}

impl TiltTransform {
    /// Tilt for `pointer` over a card occupying `rect`.
    ///
    /// The card leans away from the pointer: below center tips the top
    /// edge forward (positive X), right of center turns it left
    /// (negative Y).
    #[must_use]
    pub fn toward(rect: Rect, pointer: Point, config: &EffectsConfig) -> Self {
        let local = rect.local(pointer);
        let center_x = rect.width / 2.0;
        let center_y = rect.height / 2.0;
        Self {
            perspective: config.perspective,
            rotate_x: (local.y - center_y) / config.tilt_divisor,
            rotate_y: -(local.x - center_x) / config.tilt_divisor,
            lift: config.lift,
        }
    }

    /// Flat, resting card.
    #[must_use]
    pub fn rest(config: &EffectsConfig) -> Self {
        Self {
            perspective: config.perspective,
            rotate_x: 0.0,
            rotate_y: 0.0,
            lift: 0.0,
        }
    }

    /// CSS `transform` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        let translate = if self.lift == 0.0 {
            "0".to_string()
        } else {
            format!("{}px", css_number(-self.lift))
        };
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateY({translate})",
            css_number(self.perspective),
            css_number(self.rotate_x),
            css_number(self.rotate_y),
        )
    }
}

/// Tilts one skill card toward the pointer.
#[derive(Debug, Clone)]
pub struct MagneticCard<N> {
    card: N,
    config: EffectsConfig,
}

impl<N: DomNode> MagneticCard<N> {
    /// Wrap a card.
    pub const fn new(card: N, config: EffectsConfig) -> Self {
        Self { card, config }
    }

    /// The card element.
    pub const fn element(&self) -> &N {
        &self.card
    }

    /// Pointer moved within the card.
    pub fn on_pointer_move(&self, client: Point) -> TiltTransform {
        let tilt = TiltTransform::toward(self.card.bounding_rect(), client, &self.config);
        log_dom("tilt card", self.card.set_style("transform", &tilt.to_css()));
        tilt
    }

    /// Pointer left the card.
    pub fn on_pointer_leave(&self) {
        let rest = TiltTransform::rest(&self.config);
        log_dom("reset card", self.card.set_style("transform", &rest.to_css()));
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The effect behaviors of one page, collected once.
#[derive(Debug, Clone)]
pub struct Effects<N> {
    /// Cursor glow, when the page has a glow element.
    pub glow: Option<CursorGlow<N>>,
    /// Navbar scroll state, when the page has a navbar.
    pub navbar: Option<NavbarScroll<N>>,
    /// Reveal-on-scroll sections.
    pub reveal: RevealTracker<N>,
    /// Cards present at init time. Cards added later are not tilted.
    pub cards: Vec<MagneticCard<N>>,
}

impl<N: DomNode + PartialEq> Effects<N> {
    /// Collect the effect targets from `doc`, hide the sections, and
    /// install the reveal style rule.
    pub fn init<D: DomDocument<Node = N>>(doc: &D, config: &SiteConfig) -> Self {
        let anchors = &config.anchors;
        let effects = &config.effects;

        let glow = doc.query_selector(&anchors.cursor_glow).map(CursorGlow::new);

        let navbar = doc
            .element_by_id(&anchors.navbar)
            .map(|n| NavbarScroll::new(n, effects.scroll_threshold));
        if navbar.is_none() {
            tracing::warn!(id = %anchors.navbar, "navbar not found, scroll state disabled");
        }

        install_reveal_style(doc, &anchors.section);
        let reveal = RevealTracker::new(doc.query_selector_all(&anchors.section), effects);

        let cards: Vec<_> = doc
            .query_selector_all(&anchors.skill_card)
            .into_iter()
            .map(|card| MagneticCard::new(card, effects.clone()))
            .collect();

        tracing::debug!(
            glow = glow.is_some(),
            sections = reveal.len(),
            cards = cards.len(),
            "effects initialized"
        );

        Self {
            glow,
            navbar,
            reveal,
            cards,
        }
    }
}
