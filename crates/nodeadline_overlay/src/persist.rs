//! Owner-only directory creation and file writes.

use crate::error::OverlayError;
use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Creates `dir` and any missing parents, readable only by the owner.
pub(crate) fn create_private_dir(dir: &Path) -> Result<(), OverlayError> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);
    builder
        .create(dir)
        .map_err(|source| OverlayError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        })
}

/// Writes `contents` to `path`, replacing any previous file.
///
/// New files are created readable and writable by the owner only.
pub(crate) fn write_private(path: &Path, contents: &[u8]) -> Result<(), OverlayError> {
    let persist = |e: std::io::Error| OverlayError::Persist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);
    let mut file = options.open(path).map_err(persist)?;
    file.write_all(contents).map_err(persist)?;
    file.sync_all().map_err(persist)
}
