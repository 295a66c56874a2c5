//! Browser services behind the upload flow.
//!
//! # Services
//!
//! - [`upload`] - Multipart upload to the backend and response handling
//! - [`viewer`] - Opening the binary result through an object URL
//! - [`cleanup`] - Deferred release of object URLs with cancel handles
//!
//! Each service is a trait with a browser implementation, so the
//! upload flow can run against in-memory doubles.

pub mod cleanup;
pub mod upload;
pub mod viewer;

pub use cleanup::*;
pub use upload::*;
pub use viewer::*;
