//! Error types for locating and renaming declarations.

use nodeadline_go::SyntaxError;
use std::path::PathBuf;

/// Errors that can occur while transforming a package.
///
/// None of these leave anything behind on disk: the transformer only reads.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// The package directory is missing, unreadable, empty, or holds files
    /// belonging to another package.
    #[error("cannot resolve package {package} in {}: {reason}", dir.display())]
    PackageResolution {
        /// The package that was requested.
        package: String,
        /// The directory that was searched.
        dir: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A file in the package failed to lex or parse.
    #[error("parse error: {0}")]
    Parse(#[from] SyntaxError),

    /// No file in the package declares the requested function.
    #[error("cannot find {package}.{name}")]
    DeclarationNotFound {
        /// The package that was searched.
        package: String,
        /// The function name that was looked for.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_resolution_display() {
        let err = TransformError::PackageResolution {
            package: "context".to_string(),
            dir: PathBuf::from("/goroot/src/context"),
            reason: "no Go files".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cannot resolve package context"));
        assert!(msg.contains("/goroot/src/context"));
        assert!(msg.contains("no Go files"));
    }

    #[test]
    fn parse_display_carries_location() {
        let err = TransformError::from(SyntaxError {
            path: PathBuf::from("context.go"),
            line: 3,
            col: 7,
            message: "expected '}', found EOF".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "parse error: context.go:3:7: expected '}', found EOF"
        );
    }

    #[test]
    fn declaration_not_found_display() {
        let err = TransformError::DeclarationNotFound {
            package: "context".to_string(),
            name: "WithDeadlineCause".to_string(),
        };
        assert_eq!(err.to_string(), "cannot find context.WithDeadlineCause");
    }
}
