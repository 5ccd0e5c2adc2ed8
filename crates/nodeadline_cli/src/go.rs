//! `nodeadline go`: run a go command against the overlay.

use crate::settings::Settings;
use crate::{GlobalArgs, GoArgs};
use nodeadline_overlay::OverlayBuilder;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Runs the `go` subcommand, returning the go command's exit code.
pub fn run(args: &GoArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = Settings::resolve(&args.location, global)?;
    let builder = OverlayBuilder::from_config(&settings.config);
    let manifest = builder.build(false, &settings.module_root, &settings.cache_dir)?;

    let go_args = overlay_args(&args.args, &manifest);
    debug!(program = %settings.config.toolchain.go, args = ?go_args, "running go");
    let status = Command::new(&settings.config.toolchain.go)
        .args(&go_args)
        .current_dir(&settings.module_root)
        .status()
        .map_err(|e| format!("failed to run {}: {e}", settings.config.toolchain.go))?;

    // A signal-terminated child has no exit code.
    Ok(status.code().unwrap_or(1))
}

/// Inserts `-overlay=<manifest>` right after the go subcommand.
fn overlay_args(args: &[String], manifest: &Path) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len() + 1);
    let mut rest = args.iter();
    if let Some(subcommand) = rest.next() {
        out.push(subcommand.clone());
    }
    out.push(format!("-overlay={}", manifest.display()));
    out.extend(rest.cloned());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn overlay_follows_subcommand() {
        let got = overlay_args(
            &strings(&["test", "-run", "TestSlow", "./..."]),
            Path::new("/cache/overlay_go1.22.0.json"),
        );
        assert_eq!(
            got,
            strings(&[
                "test",
                "-overlay=/cache/overlay_go1.22.0.json",
                "-run",
                "TestSlow",
                "./...",
            ])
        );
    }

    #[test]
    fn lone_subcommand() {
        let got = overlay_args(&strings(&["build"]), Path::new("o.json"));
        assert_eq!(got, strings(&["build", "-overlay=o.json"]));
    }
}
