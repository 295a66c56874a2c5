//! FileDrop - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for staging files and uploading them to a
//! report backend in a single multipart request. The binary response is
//! opened in a new tab.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, instructions)                             │
//! │  ├── Dropzone (drag & drop / file dialog)                   │
//! │  ├── FileList + UploadButton (when files are staged)        │
//! │  └── StatusBanners (success / error)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (StagedFile, UploadStatus, AppError, etc.)
//! - [`store`] - Pending-file state and its reducer
//! - [`components`] - UI components (Dropzone, FileList, UploadButton, etc.)
//! - [`services`] - Upload, result viewer and deferred cleanup
//! - [`format`] - Human-readable byte sizes

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod format;
pub mod services;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Files
    FileHandle, FileId, StagedFile,
    // Status
    UploadOutcome, UploadPhase, UploadStatus,
    // Errors
    AppError, AppResult,
};

// State
pub use store::{run_upload, Store, UploadState};

// Components
pub use components::*;

// Formatting
pub use format::format_bytes;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install the panic hook and console logger, then mount the app.
pub fn start() {
    console_error_panic_hook::set_once();

    _ = console_log::init_with_level(LOG_LEVEL);

    log::info!("🦀 FileDrop - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Upload Your Files"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let store = Store::new(UploadConfig::default());
    let files = store.files();
    let status = store.status();
    let summary = store.summary();

    view! {
        <div class="container">
            <div class="card">
                <Hero/>

                <Dropzone on_files={move |files: Vec<web_sys::File>| store.add_files(files)}/>

                <Show
                    when=move || files.with(|files| !files.is_empty())
                    fallback=|| view! { }
                >
                    <FileList files=files on_remove={move |id: FileId| store.remove_file(id)}/>
                    <UploadButton summary=summary on_upload={move |_: ()| store.upload_files()}/>
                </Show>

                <StatusBanners status=status/>
            </div>

            <Footer/>
        </div>
    }
}
