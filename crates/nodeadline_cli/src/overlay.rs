//! `nodeadline overlay`: generate or reuse the overlay and print its path.

use crate::settings::Settings;
use crate::{GlobalArgs, OverlayArgs};
use nodeadline_overlay::OverlayBuilder;

/// Runs the `overlay` subcommand.
pub fn run(args: &OverlayArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = Settings::resolve(&args.location, global)?;
    let builder = OverlayBuilder::from_config(&settings.config);
    let manifest = builder.build(args.update, &settings.module_root, &settings.cache_dir)?;
    println!("{}", manifest.display());
    Ok(0)
}
