//! Error types for overlay generation.

use nodeadline_transform::TransformError;
use std::path::PathBuf;

/// Errors that can occur while building an overlay.
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried. Each one names the stage that failed and its underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// Querying the toolchain for its version or root failed, or returned
    /// something unusable.
    #[error("environment query `{query}` failed: {reason}")]
    EnvironmentQuery {
        /// The query that was run, e.g. `go env GOVERSION`.
        query: String,
        /// Description of the failure.
        reason: String,
    },

    /// Checking for a cached manifest failed for a reason other than absence.
    #[error("cannot check overlay cache at {}: {source}", path.display())]
    CacheCheck {
        /// The manifest path that was checked.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The cache directory could not be created.
    #[error("cannot create cache directory {}: {source}", path.display())]
    DirectoryCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Locating or renaming the target declaration failed.
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    /// The composed source could not be formatted.
    #[error("format error: {reason}")]
    Format {
        /// Description of the failure.
        reason: String,
    },

    /// Writing the generated source or the manifest failed.
    #[error("cannot write {}: {reason}", path.display())]
    Persist {
        /// The file that could not be written.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A manifest read back from the cache is not valid.
    #[error("invalid overlay manifest {}: {reason}", path.display())]
    InvalidManifest {
        /// The manifest path.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },
}
