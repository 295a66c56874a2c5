//! Pending-file store.
//!
//! [`UploadState`] is an immutable snapshot of the staged files and the
//! upload status. It only changes through [`UploadState::reduce`], fed
//! with [`Action`] messages, so every transition can be exercised
//! without a DOM. [`Store`] keeps the current snapshot in a Leptos
//! signal for the components.

use std::rc::Rc;

use leptos::*;
use web_sys::File;

use crate::components::UploadSummary;
use crate::config::UploadConfig;
use crate::services::{BrowserUploader, ResultViewer, Scheduler, UploadTransport, Uploader};
use crate::types::{FileHandle, FileId, StagedFile, UploadOutcome, UploadStatus};

/// A state transition request.
#[derive(Clone, Debug, PartialEq)]
pub enum Action<H> {
    /// Stage new files after the existing ones.
    AddFiles(Vec<H>),
    /// Drop one staged file. Unknown ids are ignored.
    RemoveFile(FileId),
    /// An upload request is about to be sent.
    UploadStarted,
    /// The upload request completed, one way or the other.
    UploadFinished(UploadOutcome),
}

/// Snapshot of the staged files and the upload status.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadState<H> {
    files: Vec<StagedFile<H>>,
    status: UploadStatus,
    next_seq: u64,
}

impl<H> Default for UploadState<H> {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            status: UploadStatus::default(),
            next_seq: 0,
        }
    }
}

impl<H: FileHandle> UploadState<H> {
    pub fn files(&self) -> &[StagedFile<H>] {
        &self.files
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|staged| staged.file.size()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Apply `action`, returning the next snapshot.
    pub fn reduce(&self, action: Action<H>) -> Self {
        let mut next = self.clone();
        match action {
            Action::AddFiles(handles) => {
                // New input invalidates the previous outcome.
                next.status.upload_success = false;
                next.status.upload_error = None;
                for file in handles {
                    let id = FileId::new(&file.name(), file.last_modified(), next.next_seq);
                    next.next_seq += 1;
                    next.files.push(StagedFile { id, file });
                }
            }
            Action::RemoveFile(id) => {
                next.files.retain(|staged| staged.id != id);
            }
            Action::UploadStarted => {
                next.status.is_uploading = true;
                next.status.upload_success = false;
                next.status.upload_error = None;
            }
            Action::UploadFinished(UploadOutcome::Succeeded) => {
                next.status.is_uploading = false;
                next.status.upload_success = true;
                next.status.upload_error = None;
                next.files = Vec::new();
            }
            Action::UploadFinished(UploadOutcome::Failed(message)) => {
                next.status.is_uploading = false;
                next.status.upload_success = false;
                next.status.upload_error = Some(message);
            }
        }
        next
    }
}

/// Upload the files of `state`, reporting progress through `dispatch`.
///
/// Does nothing and returns `false` when there is nothing to upload or an
/// upload is already in flight. Otherwise dispatches
/// [`Action::UploadStarted`], then exactly one [`Action::UploadFinished`].
pub async fn run_upload<H, T, V, S>(
    state: &UploadState<H>,
    uploader: &Uploader<T, V, S>,
    mut dispatch: impl FnMut(Action<H>),
) -> bool
where
    H: FileHandle,
    T: UploadTransport<H>,
    V: ResultViewer + 'static,
    S: Scheduler,
{
    if state.is_empty() || state.status().is_uploading {
        return false;
    }

    dispatch(Action::UploadStarted);
    let outcome = uploader.upload(state.files()).await;
    dispatch(Action::UploadFinished(outcome));
    true
}

/// Reactive handle on the current [`UploadState`].
///
/// `H` is the staged file type and `U` the uploader; the app uses
/// `web_sys::File` with a [`BrowserUploader`].
pub struct Store<H: 'static = File, U: 'static = BrowserUploader> {
    state: RwSignal<UploadState<H>>,
    uploader: StoredValue<Rc<U>>,
}

impl<H: 'static, U: 'static> Clone for Store<H, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: 'static, U: 'static> Copy for Store<H, U> {}

impl Store {
    pub fn new(config: UploadConfig) -> Self {
        Store::with_uploader(BrowserUploader::browser(config))
    }
}

impl<H: FileHandle, U: 'static> Store<H, U> {
    pub fn with_uploader(uploader: U) -> Self {
        Self {
            state: create_rw_signal(UploadState::default()),
            uploader: store_value(Rc::new(uploader)),
        }
    }

    pub fn files(&self) -> Signal<Vec<StagedFile<H>>> {
        let state = self.state;
        Signal::derive(move || state.with(|state| state.files().to_vec()))
    }

    pub fn status(&self) -> Signal<UploadStatus> {
        let state = self.state;
        Signal::derive(move || state.with(|state| state.status().clone()))
    }

    pub fn summary(&self) -> Signal<UploadSummary> {
        let state = self.state;
        Signal::derive(move || {
            state.with(|state| UploadSummary {
                count: state.file_count(),
                total_bytes: state.total_bytes(),
                is_uploading: state.status().is_uploading,
            })
        })
    }

    pub fn dispatch(&self, action: Action<H>) {
        self.state.update(|state| *state = state.reduce(action));
    }

    pub fn add_files(&self, files: Vec<H>) {
        log::debug!("Staging {} file(s)", files.len());
        self.dispatch(Action::AddFiles(files));
    }

    pub fn remove_file(&self, id: FileId) {
        self.dispatch(Action::RemoveFile(id));
    }
}

impl<H, T, V, S> Store<H, Uploader<T, V, S>>
where
    H: FileHandle,
    T: UploadTransport<H> + 'static,
    V: ResultViewer + 'static,
    S: Scheduler + 'static,
{
    /// Start an upload of the current files in the background.
    pub fn upload_files(&self) {
        let snapshot = self.state.get_untracked();
        if snapshot.is_empty() {
            return;
        }

        let uploader = self.uploader.get_value();
        let store = *self;
        spawn_local(async move {
            run_upload(&snapshot, &uploader, |action| store.dispatch(action)).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::executor::block_on;

    use super::*;
    use crate::config::SERVER_ERROR_FALLBACK;
    use crate::services::ManualScheduler;
    use crate::testing::{FakeFile, FakeTransport, RecordingViewer};
    use crate::types::{AppError, UploadPhase};

    type TestUploader = Uploader<FakeTransport, RecordingViewer, ManualScheduler>;

    fn uploader(transport: FakeTransport) -> TestUploader {
        Uploader::new(
            UploadConfig::default(),
            transport,
            RecordingViewer::default(),
            ManualScheduler::new(),
        )
    }

    fn state_with(names: &[(&str, u64)]) -> UploadState<FakeFile> {
        let files = names
            .iter()
            .map(|(name, size)| FakeFile::new(name, *size))
            .collect();
        UploadState::default().reduce(Action::AddFiles(files))
    }

    /// Drive one upload, applying every dispatched action to `state`.
    fn upload(state: UploadState<FakeFile>, uploader: &TestUploader) -> (UploadState<FakeFile>, Vec<UploadStatus>) {
        let mut current = state.clone();
        let mut seen = Vec::new();
        block_on(run_upload(&state, uploader, |action| {
            current = current.reduce(action);
            seen.push(current.status().clone());
        }));
        (current, seen)
    }

    fn names(state: &UploadState<FakeFile>) -> Vec<String> {
        state.files().iter().map(|staged| staged.file.name.clone()).collect()
    }

    #[test]
    fn test_add_files_concatenates_in_call_order() {
        let state = UploadState::default()
            .reduce(Action::AddFiles(vec![FakeFile::new("a.txt", 1), FakeFile::new("b.txt", 2)]))
            .reduce(Action::AddFiles(vec![]))
            .reduce(Action::AddFiles(vec![FakeFile::new("a.txt", 1), FakeFile::new("c.txt", 3)]));

        assert_eq!(names(&state), vec!["a.txt", "b.txt", "a.txt", "c.txt"]);

        let mut ids: Vec<_> = state.files().iter().map(|staged| staged.id.clone()).collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_add_files_clears_previous_outcome() {
        let failed = state_with(&[("a.txt", 10)])
            .reduce(Action::UploadStarted)
            .reduce(Action::UploadFinished(UploadOutcome::Failed("disk full".into())));
        assert_eq!(failed.status().phase(), UploadPhase::Failed("disk full".into()));

        let next = failed.reduce(Action::AddFiles(vec![FakeFile::new("b.txt", 1)]));
        assert_eq!(next.status().phase(), UploadPhase::Idle);

        let succeeded = state_with(&[("a.txt", 10)])
            .reduce(Action::UploadStarted)
            .reduce(Action::UploadFinished(UploadOutcome::Succeeded));
        let next = succeeded.reduce(Action::AddFiles(vec![FakeFile::new("b.txt", 1)]));
        assert!(!next.status().upload_success);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let state = state_with(&[("a.txt", 10), ("b.txt", 20)]);
        let next = state.reduce(Action::RemoveFile(FileId::new("a.txt", 0, 99)));
        assert_eq!(next, state);
    }

    #[test]
    fn test_remove_keeps_order_of_the_rest() {
        let state = state_with(&[("a.txt", 10), ("b.txt", 20), ("c.txt", 30)]);
        let id = state.files()[1].id.clone();
        let next = state.reduce(Action::RemoveFile(id));
        assert_eq!(names(&next), vec!["a.txt", "c.txt"]);
        assert_eq!(names(&state), vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_readded_file_gets_fresh_id() {
        let state = state_with(&[("a.txt", 10)]);
        let removed = state.files()[0].id.clone();
        let state = state
            .reduce(Action::RemoveFile(removed.clone()))
            .reduce(Action::AddFiles(vec![FakeFile::new("a.txt", 10)]));
        assert_ne!(state.files()[0].id, removed);
    }

    #[test]
    fn test_totals() {
        let state = state_with(&[("a.txt", 1024), ("b.txt", 512)]);
        assert_eq!(state.file_count(), 2);
        assert_eq!(state.total_bytes(), 1536);
    }

    #[test]
    fn test_upload_on_empty_state_does_nothing() {
        let uploader = uploader(FakeTransport::respond(200, b"report"));
        let (state, seen) = upload(UploadState::default(), &uploader);

        assert!(seen.is_empty());
        assert!(uploader.transport().requests().is_empty());
        assert_eq!(state.status(), &UploadStatus::default());
    }

    #[test]
    fn test_upload_while_uploading_does_nothing() {
        let uploader = uploader(FakeTransport::respond(200, b"report"));
        let state = state_with(&[("a.txt", 10)]).reduce(Action::UploadStarted);
        let (_, seen) = upload(state, &uploader);

        assert!(seen.is_empty());
        assert!(uploader.transport().requests().is_empty());
    }

    #[test]
    fn test_successful_upload_clears_files() {
        let uploader = uploader(FakeTransport::respond(200, b"binary report"));
        let (state, seen) = upload(state_with(&[("a.txt", 10)]), &uploader);

        assert_eq!(seen[0].phase(), UploadPhase::Uploading);
        assert_eq!(state.status().phase(), UploadPhase::Success);
        assert!(!state.status().is_uploading);
        assert!(state.is_empty());

        let opened = uploader.viewer().opened();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].bytes, b"binary report");

        uploader.scheduler().advance(Duration::from_secs(10));
        assert_eq!(uploader.viewer().revoked().len(), 1);
    }

    #[test]
    fn test_server_error_keeps_files() {
        let uploader = uploader(FakeTransport::respond(500, br#"{"error":"disk full"}"#));
        let (state, _) = upload(state_with(&[("a.txt", 10)]), &uploader);

        assert_eq!(state.status().phase(), UploadPhase::Failed("disk full".into()));
        assert!(!state.status().is_uploading);
        assert_eq!(names(&state), vec!["a.txt"]);
    }

    #[test]
    fn test_unparsable_error_body_uses_fallback() {
        let uploader = uploader(FakeTransport::respond(500, b"Internal Server Error"));
        let (state, _) = upload(state_with(&[("a.txt", 10)]), &uploader);

        assert_eq!(
            state.status().upload_error.as_deref(),
            Some(SERVER_ERROR_FALLBACK)
        );
        assert!(!state.status().is_uploading);
    }

    #[test]
    fn test_network_failure_reports_its_message() {
        let uploader = uploader(FakeTransport::fail(AppError::Network(
            "connection refused".into(),
        )));
        let (state, _) = upload(state_with(&[("a.txt", 10)]), &uploader);

        assert_eq!(
            state.status().upload_error.as_deref(),
            Some("connection refused")
        );
        assert!(!state.status().is_uploading);
        assert_eq!(state.file_count(), 1);
    }

    #[test]
    fn test_retry_after_failure_resets_error() {
        let failing = uploader(FakeTransport::respond(500, br#"{"error":"disk full"}"#));
        let (state, _) = upload(state_with(&[("a.txt", 10)]), &failing);

        let working = uploader(FakeTransport::respond(200, b"ok"));
        let (state, seen) = upload(state, &working);

        assert_eq!(seen[0].upload_error, None);
        assert_eq!(state.status().phase(), UploadPhase::Success);
        assert_eq!(working.transport().requests()[0].file_names, vec!["a.txt"]);
    }

    #[test]
    fn test_store_signals_follow_dispatched_actions() {
        let runtime = create_runtime();
        let store = Store::with_uploader(uploader(FakeTransport::respond(200, b"ok")));
        let summary = store.summary();

        assert_eq!(
            summary.get(),
            UploadSummary {
                count: 0,
                total_bytes: 0,
                is_uploading: false
            }
        );
        assert!(summary.get().is_inert());

        store.add_files(vec![FakeFile::new("a.txt", 1024), FakeFile::new("b.txt", 512)]);
        assert_eq!(summary.get().count, 2);
        assert_eq!(summary.get().total_bytes, 1536);
        assert!(!summary.get().is_inert());

        let first = store.files().get()[0].id.clone();
        store.remove_file(first);
        let remaining: Vec<String> = store
            .files()
            .get()
            .iter()
            .map(|staged| staged.file.name.clone())
            .collect();
        assert_eq!(remaining, vec!["b.txt"]);
        assert_eq!(summary.get().total_bytes, 512);

        store.dispatch(Action::UploadStarted);
        assert!(summary.get().is_inert());
        assert_eq!(store.status().get().phase(), UploadPhase::Uploading);

        store.dispatch(Action::UploadFinished(UploadOutcome::Failed("disk full".into())));
        assert_eq!(
            store.status().get().upload_error.as_deref(),
            Some("disk full")
        );
        assert_eq!(summary.get().count, 1);

        runtime.dispose();
    }
}
