//! Locating the source files of a standard-library package.

use crate::constraint::BuildContext;
use crate::error::TransformError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The source files making up one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDir {
    /// The package name.
    pub name: String,
    /// The package directory.
    pub dir: PathBuf,
    /// Buildable source files, sorted by path.
    pub files: Vec<PathBuf>,
}

impl PackageDir {
    /// Scans `dir` for the files of package `name` built for `context`.
    ///
    /// Test files, files the Go tool ignores (leading `_` or `.`) and files
    /// excluded by their `_GOOS`/`_GOARCH` suffix or `//go:build` line are
    /// skipped. Fails if the directory cannot be read, a constraint line is
    /// malformed, or no files remain.
    pub fn scan(dir: &Path, name: &str, context: &BuildContext) -> Result<Self, TransformError> {
        let resolution = |reason: String| TransformError::PackageResolution {
            package: name.to_string(),
            dir: dir.to_path_buf(),
            reason,
        };

        let entries = std::fs::read_dir(dir).map_err(|e| resolution(e.to_string()))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| resolution(e.to_string()))?;
            let path = entry.path();
            if !path.is_file() || !is_buildable(&path, context) {
                continue;
            }
            let source = std::fs::read_to_string(&path)
                .map_err(|e| resolution(format!("cannot read {}: {e}", path.display())))?;
            let included = context
                .matches_header(&source)
                .map_err(|e| resolution(format!("{}: {e}", path.display())))?;
            if included {
                files.push(path);
            } else {
                debug!(file = %path.display(), "excluded by build constraint");
            }
        }
        if files.is_empty() {
            return Err(resolution("no buildable Go source files".to_string()));
        }
        files.sort();

        Ok(Self {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            files,
        })
    }
}

/// Resolves package `name` inside the toolchain root `root`.
///
/// Standard-library packages live at `{root}/src/{name}`.
pub fn resolve_package(
    root: &Path,
    name: &str,
    context: &BuildContext,
) -> Result<PackageDir, TransformError> {
    PackageDir::scan(&root.join("src").join(name), name, context)
}

/// Returns `true` for `.go` files whose name puts them in a normal build.
fn is_buildable(path: &Path, context: &BuildContext) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    file_name.ends_with(".go")
        && !file_name.ends_with("_test.go")
        && !file_name.starts_with('_')
        && !file_name.starts_with('.')
        && context.matches_file_name(file_name)
}
