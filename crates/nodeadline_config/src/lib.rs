//! Parsing and validation of `nodeadline.toml` configuration files.
//!
//! The file is optional. It selects the Go program, the formatter used on
//! generated source, and where overlays are cached.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
