//! The summary printed after a bundling pass.

use console::Term;
use isle_bundler::{AssetOutcome, BundleReport, SkipReason};
use owo_colors::Style;
use std::time::Duration;

use super::paint;

/// Format a duration as `ms`, seconds, or `m s`.
///
/// ```
/// use std::time::Duration;
/// use isle_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

pub fn skip_label(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NoLocation => "no file locations",
        SkipReason::NotHtml => "not HTML",
        SkipReason::NoIslands => "no islands",
    }
}

/// One-line totals, e.g. `2 pages bundled, 1 skipped, 4 modules removed`.
pub fn summary_line(report: &BundleReport) -> String {
    let bundled = report.bundled().count();
    let skipped = report.skipped().count();
    let removed = report.removed.len();

    format!(
        "{} {} bundled, {} skipped, {} {} removed",
        bundled,
        if bundled == 1 { "page" } else { "pages" },
        skipped,
        removed,
        if removed == 1 { "module" } else { "modules" },
    )
}

/// Print the per-page table and totals to stderr.
pub fn print_bundle_summary(report: &BundleReport, elapsed: Duration) {
    let width = (Term::stderr().size().1 as usize).min(80);
    let title = if report.dry_run {
        "Bundle Summary (dry run)"
    } else {
        "Bundle Summary"
    };

    eprintln!("\n{}", paint(title, Style::new().bold().underline()));
    eprintln!("{}", "─".repeat(width));

    for asset in &report.assets {
        match &asset.outcome {
            AssetOutcome::Bundled {
                script_path,
                modules,
                ..
            } => eprintln!(
                "  {} {} {} {}",
                paint("▸", Style::new().blue()),
                paint(&asset.name, Style::new().bright_white().bold()),
                script_path,
                paint(&format!("({} modules)", modules.len()), Style::new().dimmed()),
            ),
            AssetOutcome::Skipped(reason) => eprintln!(
                "  {} {}",
                paint("·", Style::new().dimmed()),
                paint(
                    &format!("{} skipped ({})", asset.name, skip_label(*reason)),
                    Style::new().dimmed()
                ),
            ),
        }
    }

    eprintln!("{}", "─".repeat(width));
    eprintln!(
        "  {} {} in {}",
        paint("Total:", Style::new().bold()),
        paint(&summary_line(report), Style::new().green()),
        paint(&format_duration(elapsed), Style::new().green()),
    );
}
