//! UI Components for the FileDrop application.
//!
//! # Layout Components
//! - [`Hero`] - Title and instructions
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`Dropzone`] - Drag & drop / click-to-select surface
//! - [`FileList`] - Staged files with removal
//! - [`UploadButton`] - Upload trigger with count and total size
//! - [`StatusBanners`] - Success and error banners

mod banner;
mod dropzone;
mod file_list;
mod footer;
mod hero;
mod upload_button;

pub use banner::*;
pub use dropzone::*;
pub use file_list::*;
pub use footer::*;
pub use hero::*;
pub use upload_button::*;
