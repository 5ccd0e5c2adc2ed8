//! Configuration types deserialized from `nodeadline.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the cache subdirectory created under the user cache directory.
pub const CACHE_DIR_NAME: &str = "nodeadline";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Go toolchain settings.
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    /// Overlay cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl OverlayConfig {
    /// Returns the directory overlays are cached in.
    ///
    /// Uses `cache.dir` when set, otherwise `<user cache dir>/nodeadline`,
    /// falling back to `.nodeadline-cache` in `module_root` on platforms
    /// without a user cache directory.
    pub fn cache_dir(&self, module_root: &Path) -> PathBuf {
        if let Some(dir) = &self.cache.dir {
            return dir.clone();
        }
        match dirs::cache_dir() {
            Some(base) => base.join(CACHE_DIR_NAME),
            None => module_root.join(".nodeadline-cache"),
        }
    }
}

/// Go toolchain settings.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Program used for `go env` queries and for running `go` commands.
    #[serde(default = "default_go")]
    pub go: String,
    /// Which formatter re-formats the generated source.
    #[serde(default)]
    pub formatter: FormatterChoice,
    /// Program used when the `gofmt` formatter is selected.
    #[serde(default = "default_gofmt")]
    pub gofmt: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            go: default_go(),
            formatter: FormatterChoice::default(),
            gofmt: default_gofmt(),
        }
    }
}

fn default_go() -> String {
    "go".to_string()
}

fn default_gofmt() -> String {
    "gofmt".to_string()
}

/// Formatter selection.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormatterChoice {
    /// Use `gofmt` if it is on `PATH`, otherwise the built-in formatter (default).
    #[default]
    Auto,
    /// Always use the built-in formatter.
    Builtin,
    /// Always use `gofmt`.
    Gofmt,
}

/// Overlay cache settings.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory overlays are written to.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}
