//! Formatting composed source before it is written.

use crate::error::OverlayError;
use nodeadline_config::FormatterChoice;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Formats a complete Go source file.
pub trait SourceFormatter {
    /// Returns the formatted text. `path` is used for error messages only.
    fn format(&self, path: &Path, source: &str) -> Result<String, OverlayError>;
}

impl<F: SourceFormatter + ?Sized> SourceFormatter for Box<F> {
    fn format(&self, path: &Path, source: &str) -> Result<String, OverlayError> {
        (**self).format(path, source)
    }
}

/// The formatter built into this crate; needs no Go installation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormatter;

impl SourceFormatter for BuiltinFormatter {
    fn format(&self, path: &Path, source: &str) -> Result<String, OverlayError> {
        nodeadline_go::format_source(path, source).map_err(|e| OverlayError::Format {
            reason: e.to_string(),
        })
    }
}

/// Pipes source through `gofmt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gofmt {
    program: String,
}

impl Gofmt {
    /// Uses `program` as the `gofmt` binary.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SourceFormatter for Gofmt {
    fn format(&self, path: &Path, source: &str) -> Result<String, OverlayError> {
        let failed = |reason: String| OverlayError::Format { reason };

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("failed to run {}: {e}", self.program)))?;

        // gofmt reads all of stdin before writing anything.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(source.as_bytes()) {
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(failed(format!("failed to write to {}: {e}", self.program)));
            }
        }
        let output = child
            .wait_with_output()
            .map_err(|e| failed(format!("failed to wait for {}: {e}", self.program)))?;

        if !output.status.success() {
            // gofmt reports positions as <standard input>:line:col.
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.replace("<standard input>", &path.display().to_string());
            return Err(failed(stderr.trim().to_string()));
        }
        String::from_utf8(output.stdout)
            .map_err(|_| failed(format!("{} produced invalid UTF-8", self.program)))
    }
}

/// Resolves a configured formatter choice.
///
/// `auto` picks `gofmt` when `gofmt_program` is found on `PATH`.
pub fn formatter_for(choice: FormatterChoice, gofmt_program: &str) -> Box<dyn SourceFormatter> {
    let use_gofmt = match choice {
        FormatterChoice::Builtin => false,
        FormatterChoice::Gofmt => true,
        FormatterChoice::Auto => which::which(gofmt_program).is_ok(),
    };
    debug!(?choice, use_gofmt, "selected formatter");
    if use_gofmt {
        Box::new(Gofmt::new(gofmt_program))
    } else {
        Box::new(BuiltinFormatter)
    }
}
