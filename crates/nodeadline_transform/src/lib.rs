//! Declaration transformer for standard-library packages.
//!
//! Given a package directory, [`locate_and_rename`] parses every file that
//! is part of the build (see [`BuildContext`]), renames the first top-level function with the target name, and
//! returns the containing file re-printed along with its original path.
//! [`resolve_package`] maps a toolchain root and package name to the
//! directory to search.

#![warn(missing_docs)]

pub mod constraint;
pub mod error;
pub mod package;
pub mod rename;

pub use constraint::BuildContext;
pub use error::TransformError;
pub use package::{resolve_package, PackageDir};
pub use rename::{locate_and_rename, rename_in_package, Transformed};
