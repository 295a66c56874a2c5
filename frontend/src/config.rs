//! Application configuration.
//!
//! Centralized configuration for the FileDrop frontend.
//! Everything is hardcoded; the upload flow receives an [`UploadConfig`]
//! so tests can point it elsewhere.

use std::time::Duration;

/// Backend endpoint receiving the multipart upload.
pub const UPLOAD_ENDPOINT: &str = "http://127.0.0.1:8000/upload";

/// Multipart field name shared by every uploaded file.
///
/// The backend reads the repeated field as an array.
pub const UPLOAD_FIELD_NAME: &str = "files";

/// How long the object URL of a downloaded result stays valid.
pub const OBJECT_URL_TTL: Duration = Duration::from_secs(10);

/// Browsing context the result is opened in.
pub const RESULT_TARGET: &str = "_blank";

/// Banner text when the server error body cannot be parsed.
pub const SERVER_ERROR_FALLBACK: &str = "Server returned an error";

/// Banner text when an error carries no message of its own.
pub const UNKNOWN_ERROR_FALLBACK: &str = "An unknown error occurred.";

/// Console log level.
pub const LOG_LEVEL: log::Level = log::Level::Debug;

/// Settings used by [`Uploader`](crate::services::Uploader).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    /// Absolute URL of the upload endpoint.
    pub endpoint: String,
    /// Field name for every file part.
    pub field_name: String,
    /// Delay before the result's object URL is revoked.
    pub object_url_ttl: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: UPLOAD_ENDPOINT.to_string(),
            field_name: UPLOAD_FIELD_NAME.to_string(),
            object_url_ttl: OBJECT_URL_TTL,
        }
    }
}
