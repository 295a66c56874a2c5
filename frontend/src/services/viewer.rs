//! Opening upload results in a new tab.

use js_sys::{Array, Uint8Array};
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::config::RESULT_TARGET;
use crate::types::{AppError, AppResult};

/// Binary body returned by a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultPayload {
    pub bytes: Vec<u8>,
    /// `Content-Type` header of the response, if any.
    pub content_type: Option<String>,
}

/// Presents a result to the user through a temporary object URL.
pub trait ResultViewer {
    /// Expose the payload under an object URL and open it.
    ///
    /// Returns the URL, which stays valid until [`revoke`](Self::revoke).
    fn open(&self, payload: &ResultPayload) -> AppResult<String>;

    /// Release an object URL returned by [`open`](Self::open).
    fn revoke(&self, url: &str);
}

/// Blob + object URL + `window.open`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserViewer;

impl BrowserViewer {
    fn to_blob(payload: &ResultPayload) -> AppResult<Blob> {
        let bytes = Uint8Array::from(payload.bytes.as_slice());
        let parts = Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        if let Some(content_type) = &payload.content_type {
            options.set_type(content_type);
        }
        Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| AppError::from_js("Failed to create Blob", &e))
    }
}

impl ResultViewer for BrowserViewer {
    fn open(&self, payload: &ResultPayload) -> AppResult<String> {
        let blob = Self::to_blob(payload)?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| AppError::from_js("Failed to create object URL", &e))?;

        match gloo_utils::window().open_with_url_and_target(&url, RESULT_TARGET) {
            Ok(Some(_)) => {}
            Ok(None) => log::warn!("Result tab was blocked by the browser: {}", url),
            Err(e) => {
                self.revoke(&url);
                return Err(AppError::from_js("Failed to open result", &e));
            }
        }

        log::debug!("Opened result ({} bytes) at {}", payload.bytes.len(), url);
        Ok(url)
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("Failed to revoke {}: {:?}", url, e);
        }
    }
}
