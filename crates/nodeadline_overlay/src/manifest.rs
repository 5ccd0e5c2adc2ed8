//! The overlay manifest and the version-keyed cache layout.
//!
//! For toolchain version `v` the cache directory holds two files:
//!
//! - `overlay_{v}.json`: the manifest handed to `go build -overlay`
//! - `context_{v}.go`: the generated replacement source
//!
//! The presence of the manifest is what makes a cache hit.

use crate::error::OverlayError;
use crate::persist::write_private;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Maps original source paths to their replacements.
///
/// Serializes to the JSON shape the Go toolchain expects for `-overlay`:
/// `{"Replace": {"<original>": "<replacement>"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayManifest {
    /// Original path to replacement path.
    #[serde(rename = "Replace")]
    pub replace: BTreeMap<PathBuf, PathBuf>,
}

impl OverlayManifest {
    /// Creates a manifest with a single replacement.
    pub fn single(original: PathBuf, replacement: PathBuf) -> Self {
        let mut replace = BTreeMap::new();
        replace.insert(original, replacement);
        Self { replace }
    }

    /// Writes the manifest to `path` as JSON.
    pub fn save(&self, path: &Path) -> Result<(), OverlayError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| OverlayError::Persist {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        write_private(path, json.as_bytes())
    }

    /// Reads a manifest from `path`.
    pub fn load(path: &Path) -> Result<Self, OverlayError> {
        let content = std::fs::read_to_string(path).map_err(|source| OverlayError::CacheCheck {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| OverlayError::InvalidManifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// The file locations for one toolchain version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    dir: PathBuf,
    manifest: PathBuf,
    generated: PathBuf,
}

impl CachePaths {
    /// Computes the cache layout for `version` under `cache_dir`.
    ///
    /// The version becomes part of file names, so it must be a single,
    /// non-empty path component.
    pub fn new(cache_dir: &Path, version: &str) -> Result<Self, OverlayError> {
        if !is_file_component(version) {
            return Err(OverlayError::EnvironmentQuery {
                query: "go env GOVERSION".to_string(),
                reason: format!("unusable version identifier {version:?}"),
            });
        }
        Ok(Self {
            dir: cache_dir.to_path_buf(),
            manifest: cache_dir.join(format!("overlay_{version}.json")),
            generated: cache_dir.join(format!("context_{version}.go")),
        })
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the manifest file.
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// Path of the generated source file.
    pub fn generated(&self) -> &Path {
        &self.generated
    }
}

fn is_file_component(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && !s.contains(['/', '\\', '\0'])
}
