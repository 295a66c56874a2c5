//! Test doubles for the browser-facing seams.

use std::cell::RefCell;

use crate::services::{RawResponse, ResultPayload, ResultViewer, UploadTransport};
use crate::types::{AppError, AppResult, FileHandle, FileId, StagedFile};

/// In-memory stand-in for `web_sys::File`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeFile {
    pub name: String,
    pub size: u64,
    pub last_modified: i64,
}

impl FakeFile {
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            last_modified: 1_700_000_000_000,
        }
    }
}

impl FileHandle for FakeFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn last_modified(&self) -> i64 {
        self.last_modified
    }
}

pub fn staged(name: &str, size: u64, seq: u64) -> StagedFile<FakeFile> {
    let file = FakeFile::new(name, size);
    StagedFile {
        id: FileId::new(name, file.last_modified, seq),
        file,
    }
}

/// What a [`FakeTransport`] was asked to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentRequest {
    pub endpoint: String,
    pub field_name: String,
    pub file_names: Vec<String>,
}

/// Transport answering every request with the same canned result.
pub struct FakeTransport {
    reply: AppResult<RawResponse>,
    requests: RefCell<Vec<SentRequest>>,
}

impl FakeTransport {
    pub fn respond(status: u16, body: &[u8]) -> Self {
        Self {
            reply: Ok(RawResponse {
                status,
                content_type: Some("application/octet-stream".to_string()),
                body: body.to_vec(),
            }),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn fail(error: AppError) -> Self {
        Self {
            reply: Err(error),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.requests.borrow().clone()
    }
}

impl UploadTransport<FakeFile> for FakeTransport {
    async fn send(
        &self,
        endpoint: &str,
        field_name: &str,
        files: &[StagedFile<FakeFile>],
    ) -> AppResult<RawResponse> {
        self.requests.borrow_mut().push(SentRequest {
            endpoint: endpoint.to_string(),
            field_name: field_name.to_string(),
            file_names: files.iter().map(|staged| staged.file.name()).collect(),
        });
        self.reply.clone()
    }
}

/// Viewer recording what it opened and revoked.
#[derive(Default)]
pub struct RecordingViewer {
    fail: bool,
    opened: RefCell<Vec<ResultPayload>>,
    revoked: RefCell<Vec<String>>,
}

impl RecordingViewer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<ResultPayload> {
        self.opened.borrow().clone()
    }

    pub fn revoked(&self) -> Vec<String> {
        self.revoked.borrow().clone()
    }
}

impl ResultViewer for RecordingViewer {
    fn open(&self, payload: &ResultPayload) -> AppResult<String> {
        if self.fail {
            return Err(AppError::Platform("Failed to create object URL".to_string()));
        }
        let mut opened = self.opened.borrow_mut();
        let url = format!("blob:result-{}", opened.len());
        opened.push(payload.clone());
        Ok(url)
    }

    fn revoke(&self, url: &str) {
        self.revoked.borrow_mut().push(url.to_string());
    }
}
