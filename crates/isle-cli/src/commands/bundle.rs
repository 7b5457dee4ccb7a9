//! Bundle command implementation.

use crate::cli::BundleArgs;
use crate::commands::utils;
use crate::config::IsleConfig;
use crate::error::Result;
use crate::ui;
use isle_bundler::{Integration, IslandsIntegration, discover_pages};
use std::time::Instant;
use tracing::debug;

/// Execute the bundle command.
///
/// 1. Resolve the build directory and load the configuration
/// 2. Collect every `.html` page below the directory as an asset
/// 3. Run the islands integration over the assets
/// 4. Print the summary
pub async fn execute(args: BundleArgs) -> Result<()> {
    let start = Instant::now();
    let cwd = utils::get_cwd()?;
    let dir = utils::resolve_path(&args.dir, &cwd);
    utils::ensure_dir(&dir)?;

    let config = IsleConfig::load(&args, &cwd)?;
    config.validate()?;
    debug!(?config, "configuration loaded");

    if config.dry_run {
        ui::info("Dry run: no files will be written");
    }

    let assets = discover_pages(&dir)?;
    ui::info(&format!(
        "Bundling islands in {} ({} {})",
        dir.display(),
        assets.len(),
        if assets.len() == 1 { "page" } else { "pages" }
    ));

    let integration = IslandsIntegration::new(config.to_bundle_options());
    debug!(integration = integration.name(), "running integration");
    let report = integration.build_done(&assets, &dir).await?;

    ui::print_bundle_summary(&report, start.elapsed());

    if !report.found_islands() {
        ui::warning("No islands found");
    } else if report.dry_run {
        ui::success("Dry run complete");
    } else {
        ui::success("Islands bundled");
    }

    Ok(())
}
