//! Queries against the installed Go toolchain.

use crate::error::OverlayError;
use nodeadline_transform::BuildContext;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Answers the environment questions overlay generation needs.
///
/// All queries are scoped to a module root, since a module can pin a
/// toolchain version different from the one on `PATH`.
pub trait Toolchain {
    /// Returns the toolchain version identifier, e.g. `go1.22.0`.
    fn version(&self, module_root: &Path) -> Result<String, OverlayError>;

    /// Returns the root of the toolchain installation (`GOROOT`).
    fn root(&self, module_root: &Path) -> Result<PathBuf, OverlayError>;

    /// Returns the platform packages are built for. Defaults to the host.
    fn build_context(&self, module_root: &Path) -> Result<BuildContext, OverlayError> {
        let _ = module_root;
        Ok(BuildContext::host())
    }
}

/// The `go` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoToolchain {
    program: String,
}

impl GoToolchain {
    /// Uses `program` to run `go env`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program this toolchain runs.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs `go env <var>` in `module_root` and returns its trimmed output.
    fn env(&self, module_root: &Path, var: &str) -> Result<String, OverlayError> {
        let query = format!("{} env {var}", self.program);
        let failed = |reason: String| OverlayError::EnvironmentQuery {
            query: query.clone(),
            reason,
        };

        debug!(%query, dir = %module_root.display(), "querying toolchain");
        let output = Command::new(&self.program)
            .args(["env", var])
            .current_dir(module_root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| failed(format!("failed to run: {e}")))?;

        if !output.status.success() {
            return Err(failed(format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| failed("output is not valid UTF-8".to_string()))?;
        let value = stdout.trim();
        if value.is_empty() {
            return Err(failed("empty output".to_string()));
        }
        Ok(value.to_string())
    }
}

impl Default for GoToolchain {
    fn default() -> Self {
        Self::new("go")
    }
}

impl Toolchain for GoToolchain {
    fn version(&self, module_root: &Path) -> Result<String, OverlayError> {
        self.env(module_root, "GOVERSION")
    }

    fn root(&self, module_root: &Path) -> Result<PathBuf, OverlayError> {
        self.env(module_root, "GOROOT").map(PathBuf::from)
    }

    fn build_context(&self, module_root: &Path) -> Result<BuildContext, OverlayError> {
        let goos = self.env(module_root, "GOOS")?;
        let goarch = self.env(module_root, "GOARCH")?;
        let cgo = self.env(module_root, "CGO_ENABLED")? == "1";
        Ok(BuildContext::new(goos, goarch).with_cgo(cgo))
    }
}
