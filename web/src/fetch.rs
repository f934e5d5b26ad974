//! `IndexSource` over the browser `fetch` API.

use site_search::{IndexSource, LoadError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

/// Fetches the index from a same-origin path.
pub struct FetchSource {
    window: Window,
    path: String,
}

impl FetchSource {
    /// Fetches `path` (e.g. `/index.json`) through `window`.
    pub fn new(window: Window, path: impl Into<String>) -> Self {
        Self {
            window,
            path: path.into(),
        }
    }
}

fn transport(e: JsValue) -> LoadError {
    LoadError::Transport(format!("{e:?}"))
}

impl IndexSource for FetchSource {
    fn describe(&self) -> String {
        self.path.clone()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        let response = JsFuture::from(self.window.fetch_with_str(&self.path))
            .await
            .map_err(transport)?;
        let response: Response = response.dyn_into().map_err(transport)?;
        tracing::debug!(status = response.status(), "index response");
        if !response.ok() {
            return Err(LoadError::Status(response.status()));
        }
        let body = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        body.as_string()
            .ok_or_else(|| LoadError::Transport("response body is not text".to_string()))
    }
}
