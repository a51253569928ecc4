//! Browser event wiring for the page effects.
//!
//! [`MountedEffects::bind`] attaches one listener per behavior and keeps
//! the closures alive. Dropping it removes every listener and disconnects
//! the intersection observer.

use super::dom::dom_error;
use folio_core::{Effects, IntersectionEntry, Point, Result, RevealState, RevealTracker};
use js_sys::Array;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, Window,
};

/// Viewport position of a mouse event.
pub fn mouse_event_to_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn pointer(event: &Event) -> Option<Point> {
    event.dyn_ref::<MouseEvent>().map(mouse_event_to_point)
}

/// One registered listener, removed on drop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Intersection observer over the hidden sections.
struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    fn attach(tracker: &Rc<RefCell<RevealTracker<Element>>>) -> Result<Self> {
        let shared = Rc::clone(tracker);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let entries: Vec<_> = entries
                    .iter()
                    .map(|value| value.unchecked_into::<IntersectionObserverEntry>())
                    .map(|entry| IntersectionEntry {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                for revealed in shared.borrow_mut().on_intersection(&entries) {
                    observer.unobserve(&revealed);
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(tracker.borrow().threshold()));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(dom_error)?;
        for section in tracker.borrow().pending() {
            observer.observe(section);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Effects bound to live browser events.
pub struct MountedEffects {
    reveal: Rc<RefCell<RevealTracker<Element>>>,
    observer: Option<RevealObserver>,
    listeners: Vec<Listener>,
}

impl MountedEffects {
    /// Bind every behavior in `effects`. A listener that cannot be
    /// attached is logged and skipped; the others still work.
    pub fn bind(window: &Window, document: &Document, effects: Effects<Element>) -> Self {
        let Effects {
            glow,
            navbar,
            reveal,
            cards,
        } = effects;

        let mut mounted = Self {
            reveal: Rc::new(RefCell::new(reveal)),
            observer: None,
            listeners: Vec::new(),
        };

        if let Some(glow) = glow {
            mounted.keep(
                "cursor glow",
                Listener::attach(document, "mousemove", move |e| {
                    if let Some(client) = pointer(&e) {
                        glow.track(client);
                    }
                }),
            );
        }

        if let Some(navbar) = navbar {
            let win = window.clone();
            mounted.keep(
                "navbar scroll",
                Listener::attach(window, "scroll", move |_| {
                    navbar.update(win.scroll_y().unwrap_or(0.0));
                }),
            );
        }

        if !mounted.reveal.borrow().is_empty() {
            match RevealObserver::attach(&mounted.reveal) {
                Ok(observer) => mounted.observer = Some(observer),
                Err(e) => tracing::warn!(error = %e, "reveal observer not bound"),
            }
        }

        for card in cards {
            let element = card.element().clone();
            let leaving = card.clone();
            mounted.keep(
                "card tilt",
                Listener::attach(&element, "mousemove", move |e| {
                    if let Some(client) = pointer(&e) {
                        card.on_pointer_move(client);
                    }
                }),
            );
            mounted.keep(
                "card reset",
                Listener::attach(&element, "mouseleave", move |_| leaving.on_pointer_leave()),
            );
        }

        tracing::debug!(
            listeners = mounted.listeners.len(),
            observer = mounted.observer.is_some(),
            "effects bound"
        );
        mounted
    }

    fn keep(&mut self, what: &str, listener: Result<Listener>) {
        match listener {
            Ok(listener) => self.listeners.push(listener),
            Err(e) => tracing::warn!(error = %e, "{what} listener not bound"),
        }
    }

    /// Reveal state of a section, `None` if it is not tracked.
    #[must_use]
    pub fn reveal_state(&self, section: &Element) -> Option<RevealState> {
        self.reveal.borrow().state_of(section)
    }

    /// Number of attached event listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether the sections are being observed.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }
}
