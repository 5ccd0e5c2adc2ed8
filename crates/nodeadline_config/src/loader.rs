//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{FormatterChoice, OverlayConfig};
use std::path::Path;

/// File name searched for in the module root.
pub const CONFIG_FILE_NAME: &str = "nodeadline.toml";

/// Loads `nodeadline.toml` from `module_root`.
///
/// A missing file yields the default configuration.
pub fn load_config(module_root: &Path) -> Result<OverlayConfig, ConfigError> {
    let path = module_root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(OverlayConfig::default());
    }
    load_config_file(&path)
}

/// Loads and validates a configuration file at an explicit path.
///
/// A relative `cache.dir` is resolved against the directory holding the file.
pub fn load_config_file(path: &Path) -> Result<OverlayConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = load_config_from_str(&content)?;
    if let (Some(dir), Some(base)) = (&config.cache.dir, path.parent()) {
        if dir.is_relative() {
            config.cache.dir = Some(base.join(dir));
        }
    }
    Ok(config)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<OverlayConfig, ConfigError> {
    let config: OverlayConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &OverlayConfig) -> Result<(), ConfigError> {
    if config.toolchain.go.trim().is_empty() {
        return Err(ConfigError::MissingField("toolchain.go".to_string()));
    }
    if config.toolchain.formatter == FormatterChoice::Gofmt
        && config.toolchain.gofmt.trim().is_empty()
    {
        return Err(ConfigError::MissingField("toolchain.gofmt".to_string()));
    }
    if config
        .cache
        .dir
        .as_ref()
        .is_some_and(|dir| dir.as_os_str().is_empty())
    {
        return Err(ConfigError::MissingField("cache.dir".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, OverlayConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[toolchain]
go = "/usr/local/go/bin/go"
formatter = "gofmt"
gofmt = "/usr/local/go/bin/gofmt"

[cache]
dir = "/tmp/overlays"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.toolchain.go, "/usr/local/go/bin/go");
        assert_eq!(config.toolchain.formatter, FormatterChoice::Gofmt);
        assert_eq!(config.toolchain.gofmt, "/usr/local/go/bin/gofmt");
        assert_eq!(config.cache.dir, Some(PathBuf::from("/tmp/overlays")));
    }

    #[test]
    fn builtin_formatter() {
        let config = load_config_from_str("[toolchain]\nformatter = \"builtin\"\n").unwrap();
        assert_eq!(config.toolchain.formatter, FormatterChoice::Builtin);
        assert_eq!(config.toolchain.go, "go");
    }

    #[test]
    fn unknown_formatter_is_parse_error() {
        let err = load_config_from_str("[toolchain]\nformatter = \"prettier\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = load_config_from_str("[toolchain\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_go_program() {
        let err = load_config_from_str("[toolchain]\ngo = \"\"\n").unwrap_err();
        match err {
            ConfigError::MissingField(field) => assert_eq!(field, "toolchain.go"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_gofmt_program_only_matters_when_selected() {
        assert!(load_config_from_str("[toolchain]\ngofmt = \"\"\n").is_ok());
        let err =
            load_config_from_str("[toolchain]\nformatter = \"gofmt\"\ngofmt = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, OverlayConfig::default());
    }

    #[test]
    fn relative_cache_dir_resolves_against_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[cache]\ndir = \"build/overlay\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.cache.dir, Some(tmp.path().join("build/overlay")));
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config_file(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
