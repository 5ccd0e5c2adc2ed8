//! Go build overlays that push `context` deadlines back by a day.
//!
//! [`OverlayBuilder::build`] asks the toolchain for its version, returns the
//! cached manifest for that version if there is one, and otherwise:
//!
//! 1. renames `WithDeadlineCause` in `GOROOT/src/context` to
//!    `_WithDeadlineCause`,
//! 2. appends a `WithDeadlineCause` wrapper that adds 24 hours to the
//!    deadline and delegates to the renamed original,
//! 3. formats the result and writes it to `context_{version}.go`,
//! 4. writes `overlay_{version}.json` mapping the original file to it.
//!
//! The manifest is meant to be passed to `go build -overlay`.

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod format;
pub mod manifest;
mod persist;
pub mod template;
pub mod toolchain;

pub use builder::{build_overlay, OverlayBuilder};
pub use error::OverlayError;
pub use format::{formatter_for, BuiltinFormatter, Gofmt, SourceFormatter};
pub use manifest::{CachePaths, OverlayManifest};
pub use toolchain::{GoToolchain, Toolchain};
