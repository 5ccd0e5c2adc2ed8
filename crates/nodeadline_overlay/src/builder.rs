//! Overlay generation with a version-keyed cache.

use crate::error::OverlayError;
use crate::format::{formatter_for, SourceFormatter};
use crate::manifest::{CachePaths, OverlayManifest};
use crate::persist::{create_private_dir, write_private};
use crate::template::{self, RENAMED_FUNCTION, TARGET_FUNCTION, TARGET_PACKAGE};
use crate::toolchain::{GoToolchain, Toolchain};
use nodeadline_config::{FormatterChoice, OverlayConfig};
use nodeadline_transform::{rename_in_package, resolve_package};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Builds overlays that replace `context.WithDeadlineCause`.
///
/// The builder owns its environment collaborators: a [`Toolchain`] for the
/// version and root queries and a [`SourceFormatter`] for the generated
/// source. It holds no other state; the cache lives on disk.
pub struct OverlayBuilder<T, F> {
    toolchain: T,
    formatter: F,
}

impl OverlayBuilder<GoToolchain, Box<dyn SourceFormatter>> {
    /// Creates a builder for the programs named in `config`.
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(
            GoToolchain::new(config.toolchain.go.as_str()),
            formatter_for(config.toolchain.formatter, &config.toolchain.gofmt),
        )
    }
}

impl<T: Toolchain, F: SourceFormatter> OverlayBuilder<T, F> {
    /// Creates a builder from its collaborators.
    pub fn new(toolchain: T, formatter: F) -> Self {
        Self {
            toolchain,
            formatter,
        }
    }

    /// Returns the manifest path for `module_root`, generating it if needed.
    ///
    /// When a manifest for the current toolchain version already exists in
    /// `cache_dir` and `force_refresh` is false, its path is returned without
    /// any further queries or writes. Otherwise the cache directory is
    /// created, the target declaration is renamed, the wrapper appended, the
    /// result formatted, and the generated source and manifest written.
    pub fn build(
        &self,
        force_refresh: bool,
        module_root: &Path,
        cache_dir: &Path,
    ) -> Result<PathBuf, OverlayError> {
        let version = self.toolchain.version(module_root)?;
        let paths = CachePaths::new(cache_dir, &version)?;
        debug!(%version, manifest = %paths.manifest().display(), "checking overlay cache");

        if manifest_exists(&paths)? {
            if !force_refresh {
                debug!(manifest = %paths.manifest().display(), "overlay cache hit");
                return Ok(paths.manifest().to_path_buf());
            }
            debug!("overlay cached but refresh requested");
        }

        create_private_dir(paths.dir())?;
        let root = self.toolchain.root(module_root)?;
        debug!(goroot = %root.display(), "discovered toolchain root");

        let context = self
            .toolchain
            .build_context(module_root)?
            .with_go_version(&version);
        let package = resolve_package(&root, TARGET_PACKAGE, &context)?;
        let transformed = rename_in_package(&package, TARGET_FUNCTION, RENAMED_FUNCTION)?;
        let composed = template::compose(&transformed.source);
        let formatted = self.formatter.format(paths.generated(), &composed)?;

        write_private(paths.generated(), formatted.as_bytes())?;
        OverlayManifest::single(
            transformed.original_path.clone(),
            paths.generated().to_path_buf(),
        )
        .save(paths.manifest())?;

        info!(
            %version,
            original = %transformed.original_path.display(),
            generated = %paths.generated().display(),
            "generated overlay"
        );
        Ok(paths.manifest().to_path_buf())
    }

    /// Returns the cached manifest path for the current toolchain version,
    /// or `None` if no overlay has been generated for it. Never writes.
    pub fn cached(
        &self,
        module_root: &Path,
        cache_dir: &Path,
    ) -> Result<Option<PathBuf>, OverlayError> {
        let version = self.toolchain.version(module_root)?;
        let paths = CachePaths::new(cache_dir, &version)?;
        Ok(manifest_exists(&paths)?.then(|| paths.manifest().to_path_buf()))
    }
}

/// Builds an overlay with the `go` on `PATH` and the automatic formatter.
pub fn build_overlay(
    force_refresh: bool,
    module_root: &Path,
    cache_dir: &Path,
) -> Result<PathBuf, OverlayError> {
    OverlayBuilder::new(
        GoToolchain::default(),
        formatter_for(FormatterChoice::Auto, "gofmt"),
    )
    .build(force_refresh, module_root, cache_dir)
}

/// Checks for the manifest. Absence is a miss; any other failure is an error.
fn manifest_exists(paths: &CachePaths) -> Result<bool, OverlayError> {
    match std::fs::metadata(paths.manifest()) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(OverlayError::CacheCheck {
            path: paths.manifest().to_path_buf(),
            source,
        }),
    }
}
