//! Resolving module root, configuration and cache directory for a command.

use crate::{GlobalArgs, LocationArgs};
use nodeadline_config::{load_config, load_config_file, OverlayConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything a command needs to build or find an overlay.
#[derive(Debug)]
pub struct Settings {
    /// Absolute module root.
    pub module_root: PathBuf,
    /// Absolute cache directory.
    pub cache_dir: PathBuf,
    /// Loaded configuration.
    pub config: OverlayConfig,
}

impl Settings {
    /// Resolves settings from command-line locations and global flags.
    ///
    /// Paths end up absolute so that the manifest written by the builder is
    /// usable from any working directory.
    pub fn resolve(
        location: &LocationArgs,
        global: &GlobalArgs,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let module_root = match &location.modroot {
            Some(dir) => std::path::absolute(dir)?,
            None => std::env::current_dir()?,
        };
        let config = match &global.config {
            Some(path) => load_config_file(Path::new(path))?,
            None => load_config(&module_root)?,
        };
        let cache_dir = match &location.cache_dir {
            Some(dir) => dir.clone(),
            None => config.cache_dir(&module_root),
        };
        let cache_dir = std::path::absolute(cache_dir)?;

        debug!(
            module_root = %module_root.display(),
            cache_dir = %cache_dir.display(),
            "resolved settings"
        );
        Ok(Self {
            module_root,
            cache_dir,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn global(config: Option<&Path>) -> GlobalArgs {
        GlobalArgs {
            quiet: false,
            config: config.map(|p| p.display().to_string()),
        }
    }

    #[test]
    fn explicit_locations_win() {
        let tmp = TempDir::new().unwrap();
        let location = LocationArgs {
            modroot: Some(tmp.path().to_path_buf()),
            cache_dir: Some(tmp.path().join("cache")),
        };
        let settings = Settings::resolve(&location, &global(None)).unwrap();
        assert_eq!(settings.module_root, tmp.path());
        assert_eq!(settings.cache_dir, tmp.path().join("cache"));
        assert_eq!(settings.config, OverlayConfig::default());
    }

    #[test]
    fn config_in_module_root_sets_cache_dir() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("nodeadline.toml"),
            "[cache]\ndir = \".overlays\"\n",
        )
        .unwrap();
        let location = LocationArgs {
            modroot: Some(tmp.path().to_path_buf()),
            cache_dir: None,
        };
        let settings = Settings::resolve(&location, &global(None)).unwrap();
        assert_eq!(settings.cache_dir, tmp.path().join(".overlays"));
    }

    #[test]
    fn explicit_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("custom.toml");
        std::fs::write(&config, "[toolchain]\ngo = \"go1.22.0\"\n").unwrap();
        let location = LocationArgs {
            modroot: Some(tmp.path().to_path_buf()),
            cache_dir: Some(tmp.path().join("c")),
        };
        let settings = Settings::resolve(&location, &global(Some(&config))).unwrap();
        assert_eq!(settings.config.toolchain.go, "go1.22.0");
    }

    #[test]
    fn missing_explicit_config_fails() {
        let tmp = TempDir::new().unwrap();
        let location = LocationArgs {
            modroot: Some(tmp.path().to_path_buf()),
            cache_dir: None,
        };
        let missing = tmp.path().join("absent.toml");
        assert!(Settings::resolve(&location, &global(Some(&missing))).is_err());
    }
}
