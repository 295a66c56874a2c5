//! HTTP upload of staged files to the backend.
//!
//! All staged files go out in one multipart POST, each under the same
//! field name. A successful response is opened as a binary result; any
//! failure becomes the message of a [`UploadOutcome::Failed`].

use std::rc::Rc;

use gloo_net::http::Request;
use serde::Deserialize;
use web_sys::{File, FormData};

use crate::config::{UploadConfig, SERVER_ERROR_FALLBACK};
use crate::services::cleanup::{BrowserScheduler, CleanupHandle, Scheduler};
use crate::services::viewer::{BrowserViewer, ResultPayload, ResultViewer};
use crate::types::{AppError, AppResult, FileHandle, StagedFile, UploadOutcome};

/// Status, content type and body of a backend response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error body sent by the backend with a non-success status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Sends staged files as one multipart request.
#[allow(async_fn_in_trait)]
pub trait UploadTransport<H> {
    async fn send(
        &self,
        endpoint: &str,
        field_name: &str,
        files: &[StagedFile<H>],
    ) -> AppResult<RawResponse>;
}

/// `FormData` + `fetch` through gloo-net.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl UploadTransport<File> for BrowserTransport {
    async fn send(
        &self,
        endpoint: &str,
        field_name: &str,
        files: &[StagedFile<File>],
    ) -> AppResult<RawResponse> {
        let form_data =
            FormData::new().map_err(|e| AppError::from_js("Failed to create FormData", &e))?;

        for staged in files {
            form_data
                .append_with_blob_and_filename(field_name, &staged.file, &staged.file.name())
                .map_err(|e| AppError::from_js("Failed to append file", &e))?;
        }

        // No explicit headers: the browser sets the multipart boundary.
        let response = Request::post(endpoint)
            .body(form_data)
            .map_err(|e| AppError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response
            .binary()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Turn a backend response into a result payload or a server error.
///
/// A non-success body is read as `{ "error": "..." }`. An unparsable body
/// yields the generic fallback; a parsable one without a message names the
/// status code.
pub fn interpret_response(response: RawResponse) -> AppResult<ResultPayload> {
    if response.ok() {
        return Ok(ResultPayload {
            bytes: response.body,
            content_type: response.content_type,
        });
    }

    let status = response.status;
    let message = match serde_json::from_slice::<ErrorBody>(&response.body) {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.is_empty() => message,
        Ok(_) => format!("Upload failed with status: {}", status),
        Err(_) => SERVER_ERROR_FALLBACK.to_string(),
    };
    Err(AppError::Server { status, message })
}

/// Runs one upload attempt end to end.
pub struct Uploader<T, V, S> {
    config: UploadConfig,
    transport: T,
    viewer: Rc<V>,
    scheduler: S,
}

/// Uploader wired to the real browser APIs.
pub type BrowserUploader = Uploader<BrowserTransport, BrowserViewer, BrowserScheduler>;

impl BrowserUploader {
    pub fn browser(config: UploadConfig) -> Self {
        Uploader::new(config, BrowserTransport, BrowserViewer, BrowserScheduler)
    }
}

impl<T, V, S> Uploader<T, V, S>
where
    V: ResultViewer + 'static,
    S: Scheduler,
{
    pub fn new(config: UploadConfig, transport: T, viewer: V, scheduler: S) -> Self {
        Self {
            config,
            transport,
            viewer: Rc::new(viewer),
            scheduler,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[cfg(test)]
    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Upload `files` and open the result.
    ///
    /// Never fails: every error is folded into the returned outcome.
    /// The result's object URL is released after `object_url_ttl` whatever
    /// the tab does, so the cleanup handle is not kept.
    pub async fn upload<H>(&self, files: &[StagedFile<H>]) -> UploadOutcome
    where
        H: FileHandle,
        T: UploadTransport<H>,
    {
        log::info!(
            "Uploading {} file(s) to {}",
            files.len(),
            self.config.endpoint
        );

        let outcome = UploadOutcome::from(self.try_upload(files).await);
        match &outcome {
            UploadOutcome::Succeeded => log::info!("Upload successful!"),
            UploadOutcome::Failed(message) => log::error!("Upload failed! {}", message),
        }
        outcome
    }

    async fn try_upload<H>(&self, files: &[StagedFile<H>]) -> AppResult<()>
    where
        H: FileHandle,
        T: UploadTransport<H>,
    {
        let response = self
            .transport
            .send(&self.config.endpoint, &self.config.field_name, files)
            .await?;
        let payload = interpret_response(response)?;
        let url = self.viewer.open(&payload)?;

        let viewer = Rc::clone(&self.viewer);
        let _release: CleanupHandle = self.scheduler.schedule(
            self.config.object_url_ttl,
            Box::new(move || {
                log::debug!("Releasing result URL {}", url);
                viewer.revoke(&url);
            }),
        );
        Ok(())
    }
}
