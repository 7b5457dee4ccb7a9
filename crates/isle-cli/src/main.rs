//! isle CLI - post-build island bundling.
//!
//! Parses arguments, initializes logging, and dispatches to the command
//! implementations.

use clap::Parser;
use isle_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Bundle(bundle_args) => commands::bundle_execute(bundle_args).await,
        cli::Command::Schema => commands::schema_execute(),
    };

    // Bundler errors keep their diagnostic codes and help text
    result.map_err(error::cli_error_to_miette)
}
