//! Syntax errors reported by the lexer and parser.

use std::path::PathBuf;

/// A fatal syntax error at a resolved source location.
///
/// Line and column are 1-indexed. The column counts bytes, matching what
/// `gofmt` reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}:{line}:{col}: {message}", path.display())]
pub struct SyntaxError {
    /// The file the error was found in.
    pub path: PathBuf,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub col: u32,
    /// What went wrong.
    pub message: String,
}
