//! Go source file representation with line-start indexing.

use crate::error::SyntaxError;
use crate::span::Span;
use std::path::{Path, PathBuf};

/// A Go source file loaded for parsing.
///
/// Stores the file's content along with precomputed line-start offsets so
/// errors can be reported with line/column coordinates.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// The filesystem path of this file (or a synthetic name for in-memory sources).
    pub path: PathBuf,
    /// The full text content of the file.
    pub content: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a new `SourceFile` with precomputed line starts.
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            path: path.into(),
            content,
            line_starts,
        }
    }

    /// Reads a source file from disk.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(path, content))
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Returns the text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        &self.content[span.range()]
    }

    /// Builds a [`SyntaxError`] located at `offset`.
    pub fn error_at(&self, offset: u32, message: impl Into<String>) -> SyntaxError {
        let (line, col) = self.line_col(offset);
        SyntaxError {
            path: self.path.clone(),
            line,
            col,
            message: message.into(),
        }
    }
}

fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(content: &str) -> SourceFile {
        SourceFile::new("test.go", content.to_string())
    }

    #[test]
    fn line_starts_computation() {
        let f = make_file("abc\ndef\nghi");
        assert_eq!(f.line_starts, vec![0, 4, 8]);
    }

    #[test]
    fn line_col_resolution() {
        let f = make_file("abc\ndef\nghi");
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_col(4), (2, 1));
        assert_eq!(f.line_col(5), (2, 2));
        assert_eq!(f.line_col(8), (3, 1));
    }

    #[test]
    fn line_col_at_end_of_file() {
        let f = make_file("ab\n");
        assert_eq!(f.line_col(3), (2, 1));
    }

    #[test]
    fn error_at_resolves_location() {
        let f = make_file("package p\n\nfunc (\n");
        let err = f.error_at(16, "unexpected EOF");
        assert_eq!(err.line, 3);
        assert_eq!(err.col, 6);
        assert_eq!(err.path, PathBuf::from("test.go"));
    }

    #[test]
    fn snippet_extraction() {
        let f = make_file("hello world");
        assert_eq!(f.snippet(Span::new(0, 5)), "hello");
        assert_eq!(f.snippet(Span::new(6, 11)), "world");
    }
}
