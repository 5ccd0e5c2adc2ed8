//! Finding a top-level function in a package and renaming it.

use crate::constraint::BuildContext;
use crate::error::TransformError;
use crate::package::PackageDir;
use nodeadline_go::{parse_file, print_file, GoFile, SourceFile};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The file that held the renamed declaration, re-printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// Path of the file the declaration was found in.
    pub original_path: PathBuf,
    /// Full source of that file with the declaration renamed.
    pub source: String,
}

/// Renames the function `target` in package `package` to `renamed`.
///
/// Scans `package_dir` for the package's files as built for the host
/// platform, then behaves as [`rename_in_package`].
pub fn locate_and_rename(
    package_dir: &Path,
    package: &str,
    target: &str,
    renamed: &str,
) -> Result<Transformed, TransformError> {
    let pkg = PackageDir::scan(package_dir, package, &BuildContext::host())?;
    rename_in_package(&pkg, target, renamed)
}

/// Renames the function `target` in an already resolved package.
///
/// Every file is parsed before any renaming, so a malformed file fails the
/// call even if it does not hold the target. Files are searched in path
/// order and the first top-level function (methods are skipped) named
/// `target` wins. Nothing is written to disk.
pub fn rename_in_package(
    pkg: &PackageDir,
    target: &str,
    renamed: &str,
) -> Result<Transformed, TransformError> {
    let files = parse_package(pkg)?;

    for mut file in files {
        let Some(decl) = file
            .functions_mut()
            .find(|f| !f.is_method() && f.name.name == target)
        else {
            continue;
        };
        decl.rename(renamed);
        debug!(
            file = %file.path().display(),
            from = target,
            to = renamed,
            "renamed declaration"
        );
        return Ok(Transformed {
            original_path: file.path().to_path_buf(),
            source: print_file(&file),
        });
    }

    Err(TransformError::DeclarationNotFound {
        package: pkg.name.clone(),
        name: target.to_string(),
    })
}

/// Parses every file of `pkg`, checking that each belongs to it.
fn parse_package(pkg: &PackageDir) -> Result<Vec<GoFile>, TransformError> {
    let mut parsed = Vec::with_capacity(pkg.files.len());
    for path in &pkg.files {
        let source = SourceFile::load(path).map_err(|e| TransformError::PackageResolution {
            package: pkg.name.clone(),
            dir: pkg.dir.clone(),
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        let file = parse_file(source)?;
        if file.package.name != pkg.name {
            return Err(TransformError::PackageResolution {
                package: pkg.name.clone(),
                dir: pkg.dir.clone(),
                reason: format!(
                    "found package {} in {}",
                    file.package.name,
                    path.display()
                ),
            });
        }
        parsed.push(file);
    }
    debug!(package = %pkg.name, files = parsed.len(), "parsed package");
    Ok(parsed)
}
