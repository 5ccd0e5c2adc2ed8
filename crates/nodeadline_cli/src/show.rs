//! `nodeadline show`: print the cached overlay for the active toolchain.

use crate::settings::Settings;
use crate::{GlobalArgs, ShowArgs};
use nodeadline_overlay::{OverlayBuilder, OverlayManifest};

/// Runs the `show` subcommand. Exits with 1 if nothing is cached.
pub fn run(args: &ShowArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = Settings::resolve(&args.location, global)?;
    let builder = OverlayBuilder::from_config(&settings.config);

    let Some(path) = builder.cached(&settings.module_root, &settings.cache_dir)? else {
        if !global.quiet {
            eprintln!(
                "no overlay cached in {}; run `nodeadline overlay` first",
                settings.cache_dir.display()
            );
        }
        return Ok(1);
    };

    let manifest = OverlayManifest::load(&path)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    } else {
        println!("{}", path.display());
        for line in replacement_lines(&manifest) {
            println!("{line}");
        }
    }
    Ok(0)
}

fn replacement_lines(manifest: &OverlayManifest) -> Vec<String> {
    manifest
        .replace
        .iter()
        .map(|(original, generated)| {
            format!("  {} => {}", original.display(), generated.display())
        })
        .collect()
}
