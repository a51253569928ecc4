//! Folio: the browser runtime of the portfolio page.
//!
//! Loading the module mounts the page (`autostart` feature):
//!
//! ```javascript
//! import init, { mount, unmount } from './folio.js';
//!
//! await init();                        // fetches profile.json and renders
//! unmount();                           // drop the effect listeners
//! await mount('data_url = "me.json"'); // mount again with overrides
//! ```
//!
//! All page logic lives in `folio-core`; this crate binds it to `web_sys`.

#![allow(clippy::module_name_repetitions, clippy::doc_markdown)]

pub use folio_core::*;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{HttpSource, LucideIcons, MountedEffects, WebDocument};
