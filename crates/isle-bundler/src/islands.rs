//! The bundling pass over a build's assets.

use isle_graph::{ModuleGraph, ModuleMap, ModuleName, Runtime, read_text};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::asset::{AssetMap, AssetOutcome, AssetReport, BundleReport, SkipReason, is_html};
use crate::assemble::{assemble, bundle_file_name};
use crate::cleanup::remove_orphans;
use crate::html::{PagePatcher, scan_references, script_path};
use crate::{BundleOptions, Result};

/// Replace each page's island modules with one bundle per page.
///
/// Assets are processed one at a time in map order. Every HTML page that
/// references `.js` files gets a `<uuid>.js` bundle in the module directory
/// (`dir/<assets_dir>`) and is patched in place. Once all pages are done the
/// embedded modules are deleted, unless `remove_orphans` is off.
///
/// The first error aborts the pass. Pages patched before it stay patched.
#[instrument(skip_all, fields(dir = %dir.display(), assets = assets.len()))]
pub async fn bundle_islands(
    runtime: &dyn Runtime,
    assets: &AssetMap,
    dir: &Path,
    options: &BundleOptions,
) -> Result<BundleReport> {
    options.validate()?;
    let module_dir = dir.join(&options.assets_dir);
    let patcher = PagePatcher::new(&options.assets_dir)?;

    let mut report = BundleReport {
        dry_run: options.dry_run,
        ..Default::default()
    };
    let mut embedded = ModuleMap::new();

    for (name, locations) in assets {
        let outcome = process_asset(
            runtime,
            &patcher,
            &module_dir,
            options,
            name,
            locations.first().map(|path| path.as_path()),
        )
        .await?;

        if let AssetOutcome::Bundled { modules, .. } = &outcome {
            for module in modules {
                embedded.insert_if_absent(module.clone(), ());
            }
        }
        report.assets.push(AssetReport {
            name: name.clone(),
            outcome,
        });
    }

    if embedded.is_empty() {
        info!("No islands found");
        return Ok(report);
    }

    if options.dry_run {
        debug!(modules = embedded.len(), "Dry run, keeping bundled modules");
    } else if options.remove_orphans {
        report.removed = remove_orphans(runtime, &module_dir, &embedded).await;
    }

    Ok(report)
}

#[instrument(skip_all, fields(asset = %name))]
async fn process_asset(
    runtime: &dyn Runtime,
    patcher: &PagePatcher,
    module_dir: &Path,
    options: &BundleOptions,
    name: &str,
    page: Option<&Path>,
) -> Result<AssetOutcome> {
    let Some(page) = page else {
        warn!("Skipping asset (no file locations): {name}");
        return Ok(AssetOutcome::Skipped(SkipReason::NoLocation));
    };
    if !is_html(page) {
        warn!("Skipping asset (not HTML): {name}");
        return Ok(AssetOutcome::Skipped(SkipReason::NotHtml));
    }

    let html = read_text(runtime, page).await?;
    let references = scan_references(&html);
    let Some(first_reference) = references.first() else {
        debug!("Skipping asset (no islands found): {name}");
        return Ok(AssetOutcome::Skipped(SkipReason::NoIslands));
    };

    let roots: Vec<ModuleName> = references
        .iter()
        .filter_map(|reference| ModuleName::from_reference(reference))
        .collect();
    let graph = ModuleGraph::load(runtime, module_dir, &roots).await?;
    let ordered = graph.order(&roots)?;

    let bundle = assemble(&ordered, bundle_file_name());
    let script_path = script_path(first_reference, &options.assets_dir, &bundle.file_name);

    let mut bundled = ModuleMap::new();
    for module in &bundle.modules {
        bundled.insert_if_absent(module.clone(), ());
    }
    let patched = patcher.patch(&html, &script_path, &bundled);

    if options.dry_run {
        info!("Would bundle islands: {name} ({})", bundle.file_name);
    } else {
        runtime
            .write_file(&module_dir.join(&bundle.file_name), bundle.source.as_bytes())
            .await?;
        runtime.write_file(page, patched.as_bytes()).await?;
        info!("Bundled islands: {name} ({})", bundle.file_name);
    }

    Ok(AssetOutcome::Bundled {
        page: page.to_path_buf(),
        bundle_file: bundle.file_name,
        script_path,
        modules: bundle.modules,
    })
}
