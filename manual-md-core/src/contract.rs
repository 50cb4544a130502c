//! # contract: seam between the conversion pipeline and the filesystem
//!
//! The pipeline never touches the disk itself. It hands directories and finished
//! documents to a [`DocumentSink`], which decides where the bytes really go.
//!
//! ## Implementations
//! - [`crate::write::FsSink`]: the real filesystem writer used by the CLI.
//! - `MockDocumentSink`: generated by `mockall` for tests (enabled for `cfg(test)` and
//!   the `test-export-mocks` feature so downstream crates can use it too).

use std::path::Path;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Destination for assembled documents.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait DocumentSink {
    /// Make sure `dir` (and its parents) exists.
    fn create_dir(&self, dir: &Path) -> std::io::Result<()>;

    /// Write `contents` to `path`, replacing whatever was there.
    fn write_document(&self, path: &Path, contents: &str) -> std::io::Result<()>;
}
