//! nodeadline: run Go commands with `context` deadlines pushed back by a day.
//!
//! `nodeadline overlay` generates (or reuses) a build overlay for the active
//! Go toolchain and prints its manifest path, `nodeadline show` prints the
//! cached mapping, and `nodeadline go <cmd> ...` runs `go <cmd>` with
//! `-overlay` pointing at it.

#![warn(missing_docs)]

mod go;
mod overlay;
mod settings;
mod show;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Generates Go build overlays that extend `context` deadlines.
#[derive(Parser, Debug)]
#[command(name = "nodeadline", version, about = "Go overlays without deadlines")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `nodeadline.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the overlay for the active toolchain and print its manifest path.
    Overlay(OverlayArgs),
    /// Print the cached overlay mapping for the active toolchain.
    Show(ShowArgs),
    /// Run a go command with the overlay applied.
    Go(GoArgs),
}

/// Where to look for the module and the cache.
#[derive(Args, Debug, Default)]
pub struct LocationArgs {
    /// Module root the toolchain is queried from (default: current directory).
    #[arg(long)]
    pub modroot: Option<PathBuf>,

    /// Directory overlays are cached in (overrides the configuration).
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

/// Arguments for the `nodeadline overlay` subcommand.
#[derive(Parser, Debug)]
pub struct OverlayArgs {
    /// Regenerate the overlay even if one is cached.
    #[arg(short, long)]
    pub update: bool,

    /// Module and cache locations.
    #[command(flatten)]
    pub location: LocationArgs,
}

/// Arguments for the `nodeadline show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Print the manifest as JSON.
    #[arg(long)]
    pub json: bool,

    /// Module and cache locations.
    #[command(flatten)]
    pub location: LocationArgs,
}

/// Arguments for the `nodeadline go` subcommand.
#[derive(Parser, Debug)]
pub struct GoArgs {
    /// Module and cache locations.
    #[command(flatten)]
    pub location: LocationArgs,

    /// The go subcommand and its arguments, e.g. `test ./...`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub args: Vec<String>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Overlay(ref args) => overlay::run(args, &global),
        Command::Show(ref args) => show::run(args, &global),
        Command::Go(ref args) => go::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the flags.
fn init_tracing(quiet: bool, verbose: bool) {
    let default = default_log_level(quiet, verbose);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn default_log_level(quiet: bool, verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}
