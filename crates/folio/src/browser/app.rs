//! WASM application entry points.

use super::console;
use super::dom::WebDocument;
use super::events::MountedEffects;
use super::fetch::HttpSource;
use super::icons::LucideIcons;
use folio_core::{Bootstrap, FolioError, SiteConfig};
use std::cell::RefCell;
use tracing::Level;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

thread_local! {
    static MOUNTED: RefCell<Option<MountedEffects>> = const { RefCell::new(None) };
}

fn init_runtime() {
    console_error_panic_hook::set_once();
    console::init(Level::INFO);
}

fn to_js(error: &FolioError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Load, render, and bind the effects of the current page.
///
/// Mounting again replaces the effects of the previous mount.
pub async fn run(config: SiteConfig) -> folio_core::Result<()> {
    let window = web_sys::window().ok_or_else(|| FolioError::Dom("no window".into()))?;
    let document = WebDocument::current()?;

    let effects = Bootstrap::new(&document, &HttpSource, &LucideIcons, &config)
        .mount()
        .await?;

    let mounted = MountedEffects::bind(&window, document.inner(), effects);
    MOUNTED.with(|slot| *slot.borrow_mut() = Some(mounted));
    Ok(())
}

#[cfg(feature = "autostart")]
async fn autorun() {
    if let Err(e) = run(SiteConfig::default()).await {
        tracing::warn!(error = %e, "page not mounted");
    }
}

/// Mount with the default configuration once the DOM is ready.
#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_runtime();
    let document = web_sys::window()
        .ok_or("No window")?
        .document()
        .ok_or("No document")?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| wasm_bindgen_futures::spawn_local(autorun()));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        wasm_bindgen_futures::spawn_local(autorun());
    }
    Ok(())
}

/// Mount the page by hand, optionally with a TOML configuration.
#[wasm_bindgen]
pub async fn mount(config_toml: Option<String>) -> Result<(), JsValue> {
    init_runtime();
    let config = match config_toml {
        Some(source) => SiteConfig::from_toml_str(&source).map_err(|e| to_js(&e))?,
        None => SiteConfig::default(),
    };
    run(config).await.map_err(|e| to_js(&e))
}

/// Remove the effect listeners of the current mount.
#[wasm_bindgen]
pub fn unmount() {
    let previous = MOUNTED.with(|slot| slot.borrow_mut().take());
    if previous.is_some() {
        tracing::debug!("effects unbound");
    }
}
