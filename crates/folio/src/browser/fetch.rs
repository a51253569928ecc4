//! Portfolio source backed by `window.fetch`.

use super::dom::js_error;
use async_trait::async_trait;
use folio_core::{DataSource, FetchResponse, FolioError, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

fn transport(value: JsValue) -> FolioError {
    FolioError::Transport(js_error(&value))
}

/// Fetches with the browser's `fetch`, relative to the page URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpSource;

#[async_trait(?Send)]
impl DataSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let window =
            web_sys::window().ok_or_else(|| FolioError::Transport("no window".into()))?;

        let response: Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(|_| FolioError::Transport("fetch did not yield a Response".into()))?;

        let status = response.status();
        if !response.ok() {
            // The body of an error answer is never read.
            return Ok(FetchResponse::new(status, String::new()));
        }

        let body = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        Ok(FetchResponse::new(status, body.as_string().unwrap_or_default()))
    }
}
