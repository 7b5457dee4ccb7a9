//! Command-line interface definition.
//!
//! - `isle bundle <DIR>` - Bundle every page's islands in a build directory
//! - `isle schema` - Print the JSON schema of `isle.config.json`

mod commands;
mod tests;

use clap::Parser;

pub use commands::{BundleArgs, Command};

/// isle - bundle a static site's islands into one script per page
#[derive(Parser, Debug)]
#[command(
    name = "isle",
    version,
    about = "Bundle a static site's islands into one script per page",
    long_about = "isle post-processes a finished static-site build.\n\
                  Every HTML page's island modules are merged into a single script,\n\
                  the page is patched to load it, and the original modules are removed."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows module resolution, skipped pages and deleted modules.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
