//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **File Types** - Staged files and the handle abstraction
//! - **Status Types** - Upload status flags and derived phase
//! - **Error Types** - Frontend error handling

use std::fmt;

use thiserror::Error;
use wasm_bindgen::JsCast;

use crate::config::UNKNOWN_ERROR_FALLBACK;

// =============================================================================
// File Types
// =============================================================================

/// Read access to a user-supplied file.
///
/// Implemented for `web_sys::File` in the browser. Anything else
/// implementing it can be staged, which keeps the store and the
/// upload flow usable off the DOM.
pub trait FileHandle: Clone + 'static {
    /// File name as reported by the browser.
    fn name(&self) -> String;
    /// Size in bytes.
    fn size(&self) -> u64;
    /// Last modification time, milliseconds since the Unix epoch.
    fn last_modified(&self) -> i64;
}

impl FileHandle for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn size(&self) -> u64 {
        web_sys::Blob::size(self) as u64
    }

    fn last_modified(&self) -> i64 {
        web_sys::File::last_modified(self) as i64
    }
}

/// Session-local identifier of a staged file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileId(String);

impl FileId {
    /// Build the id for the `seq`-th file staged in this session.
    ///
    /// The sequence number alone makes ids unique; name and
    /// modification time keep them readable in logs.
    pub fn new(name: &str, last_modified: i64, seq: u64) -> Self {
        Self(format!("{}-{}-{}", name, last_modified, seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file waiting in the pending list.
#[derive(Clone, Debug, PartialEq)]
pub struct StagedFile<H> {
    pub id: FileId,
    pub file: H,
}

// =============================================================================
// Status Types
// =============================================================================

/// Upload status flags rendered by the root view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadStatus {
    pub is_uploading: bool,
    pub upload_success: bool,
    pub upload_error: Option<String>,
}

/// Phase of the upload flow, derived from [`UploadStatus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Uploading,
    Success,
    Failed(String),
}

impl UploadStatus {
    pub fn phase(&self) -> UploadPhase {
        if self.is_uploading {
            UploadPhase::Uploading
        } else if let Some(message) = &self.upload_error {
            UploadPhase::Failed(message.clone())
        } else if self.upload_success {
            UploadPhase::Success
        } else {
            UploadPhase::Idle
        }
    }
}

/// Result of one upload attempt, as reported to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The backend accepted the files and the result was opened.
    Succeeded,
    /// Anything went wrong; carries the banner message.
    Failed(String),
}

impl From<AppResult<()>> for UploadOutcome {
    fn from(result: AppResult<()>) -> Self {
        match result {
            Ok(()) => UploadOutcome::Succeeded,
            Err(e) => UploadOutcome::Failed(e.user_message()),
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Every variant collapses to a single line of text in the error banner.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    /// The request could not be sent or its body could not be read.
    #[error("Network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// A browser API (FormData, Blob, object URL) failed.
    #[error("Browser error: {0}")]
    Platform(String),
    /// Failure without a usable message.
    #[error("{}", UNKNOWN_ERROR_FALLBACK)]
    Unknown,
}

impl AppError {
    /// Text shown to the user, without the category prefix.
    pub fn user_message(&self) -> String {
        let message = match self {
            AppError::Network(msg) | AppError::Platform(msg) => msg.as_str(),
            AppError::Server { message, .. } => message.as_str(),
            AppError::Unknown => "",
        };
        if message.trim().is_empty() {
            UNKNOWN_ERROR_FALLBACK.to_string()
        } else {
            message.to_string()
        }
    }

    /// Wrap a JavaScript exception thrown by a browser API.
    pub fn from_js(context: &str, value: &wasm_bindgen::JsValue) -> Self {
        let detail = value
            .dyn_ref::<js_sys::Error>()
            .and_then(|e| e.message().as_string())
            .or_else(|| value.as_string());
        match detail {
            Some(detail) if !detail.is_empty() => {
                AppError::Platform(format!("{}: {}", context, detail))
            }
            _ => AppError::Platform(context.to_string()),
        }
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_ids_differ_by_sequence() {
        let first = FileId::new("a.txt", 1_700_000_000_000, 0);
        let second = FileId::new("a.txt", 1_700_000_000_000, 1);
        assert_ne!(first, second);
        assert_eq!(first.as_str(), "a.txt-1700000000000-0");
    }

    #[test]
    fn test_phase_follows_flags() {
        let mut status = UploadStatus::default();
        assert_eq!(status.phase(), UploadPhase::Idle);

        status.is_uploading = true;
        assert_eq!(status.phase(), UploadPhase::Uploading);

        status.is_uploading = false;
        status.upload_success = true;
        assert_eq!(status.phase(), UploadPhase::Success);

        status.upload_success = false;
        status.upload_error = Some("disk full".to_string());
        assert_eq!(status.phase(), UploadPhase::Failed("disk full".to_string()));
    }

    #[test]
    fn test_server_error_shows_bare_message() {
        let error = AppError::Server {
            status: 500,
            message: "disk full".to_string(),
        };
        assert_eq!(error.user_message(), "disk full");
        assert_eq!(error.to_string(), "Server error (500): disk full");
    }

    #[test]
    fn test_empty_messages_fall_back() {
        assert_eq!(AppError::Unknown.user_message(), UNKNOWN_ERROR_FALLBACK);
        assert_eq!(
            AppError::Network(String::new()).user_message(),
            UNKNOWN_ERROR_FALLBACK
        );
    }

    #[test]
    fn test_outcome_from_result() {
        let ok: AppResult<()> = Ok(());
        assert_eq!(UploadOutcome::from(ok), UploadOutcome::Succeeded);

        let failed: AppResult<()> = Err(AppError::Network("connection refused".into()));
        assert_eq!(
            UploadOutcome::from(failed),
            UploadOutcome::Failed("connection refused".to_string())
        );
    }
}
