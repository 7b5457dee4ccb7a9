use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available isle subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bundle the islands of a finished build
    ///
    /// Finds every .html page below DIR, merges the modules each page loads
    /// into one script, patches the page and deletes the merged modules.
    Bundle(BundleArgs),

    /// Print the JSON schema of isle.config.json
    Schema,
}

/// Arguments for the bundle command
#[derive(Args, Debug, Clone, Default)]
pub struct BundleArgs {
    /// Build output directory
    ///
    /// Examples:
    ///   isle bundle dist
    ///   isle bundle ./build --assets-dir assets
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Module directory inside DIR [default: _astro]
    ///
    /// Bundles are written here and modules are resolved from here. Must be a
    /// single directory name.
    #[arg(long, value_name = "NAME")]
    pub assets_dir: Option<String>,

    /// Keep the original modules after bundling
    #[arg(long)]
    pub keep_modules: bool,

    /// Compute every bundle without writing, patching or deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the config file [default: isle.config.json]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
