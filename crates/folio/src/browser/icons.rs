//! Binding to the Lucide icon library loaded by the page.

use super::dom::js_error;
use folio_core::IconAnnotator;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `lucide.createIcons()`. Throws when the global is absent.
    #[wasm_bindgen(catch, js_namespace = lucide, js_name = createIcons)]
    fn lucide_create_icons() -> Result<(), JsValue>;
}

/// Replaces `data-lucide` markers through the page's `lucide` global.
#[derive(Debug, Clone, Copy, Default)]
pub struct LucideIcons;

impl IconAnnotator for LucideIcons {
    fn create_icons(&self) {
        if let Err(e) = lucide_create_icons() {
            tracing::warn!(error = %js_error(&e), "lucide.createIcons failed, icons left as markers");
        }
    }
}
