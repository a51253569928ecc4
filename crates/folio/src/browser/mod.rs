//! Browser runtime for the portfolio page.
//!
//! Bridges the `folio-core` traits to the browser: DOM, `fetch`, the
//! Lucide icon global, event listeners, and the console.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod console;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod fetch;
#[cfg(target_arch = "wasm32")]
pub mod icons;

#[cfg(target_arch = "wasm32")]
pub use dom::WebDocument;
#[cfg(target_arch = "wasm32")]
pub use events::MountedEffects;
#[cfg(target_arch = "wasm32")]
pub use fetch::HttpSource;
#[cfg(target_arch = "wasm32")]
pub use icons::LucideIcons;
