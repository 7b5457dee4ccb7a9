//! Build assets handed over by the host and the per-asset outcome.

use indexmap::IndexMap;
use isle_graph::ModuleName;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::Result;

/// Logical asset name to its output file locations, in host order.
///
/// Only the first location of each asset is consulted.
pub type AssetMap = IndexMap<String, Vec<PathBuf>, BuildHasherDefault<FxHasher>>;

/// Why an asset was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The asset has no file locations.
    NoLocation,
    /// The first location is not an `.html` file.
    NotHtml,
    /// The page references no `.js` files.
    NoIslands,
}

/// What happened to one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    Bundled {
        page: PathBuf,
        /// Bundle file name inside the module directory, `<uuid>.js`.
        bundle_file: String,
        /// Path written into the page's `<script src>`.
        script_path: String,
        /// Embedded modules, dependencies first.
        modules: Vec<ModuleName>,
    },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub name: String,
    pub outcome: AssetOutcome,
}

/// Summary of one bundling pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleReport {
    pub assets: Vec<AssetReport>,
    /// Modules deleted from the module directory.
    pub removed: Vec<ModuleName>,
    pub dry_run: bool,
}

impl BundleReport {
    pub fn bundled(&self) -> impl Iterator<Item = &AssetReport> {
        self.assets
            .iter()
            .filter(|asset| matches!(asset.outcome, AssetOutcome::Bundled { .. }))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &AssetReport> {
        self.assets
            .iter()
            .filter(|asset| matches!(asset.outcome, AssetOutcome::Skipped(_)))
    }

    /// Whether any page embedded at least one module.
    pub fn found_islands(&self) -> bool {
        self.bundled().next().is_some()
    }
}

/// Collect every `.html` file below `dir` as an asset.
///
/// Assets are named by their path relative to `dir` with `/` separators and
/// sorted by name, so repeated runs see pages in the same order.
pub fn discover_pages(dir: &Path) -> Result<AssetMap> {
    let mut pages = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || !is_html(entry.path()) {
            continue;
        }
        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        pages.push((name, entry.into_path()));
    }
    pages.sort();

    Ok(pages
        .into_iter()
        .map(|(name, path)| (name, vec![path]))
        .collect())
}

pub(crate) fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_pages_sorted_and_relative() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("blog/post")).unwrap();
        std::fs::create_dir_all(root.join("_astro")).unwrap();
        std::fs::write(root.join("index.html"), "").unwrap();
        std::fs::write(root.join("blog/post/index.html"), "").unwrap();
        std::fs::write(root.join("about.html"), "").unwrap();
        std::fs::write(root.join("_astro/a.js"), "").unwrap();
        std::fs::write(root.join("robots.txt"), "").unwrap();

        let pages = discover_pages(root).unwrap();
        let names: Vec<_> = pages.keys().map(String::as_str).collect();
        assert_eq!(names, ["about.html", "blog/post/index.html", "index.html"]);
        assert_eq!(pages["index.html"], vec![root.join("index.html")]);
    }

    #[test]
    fn test_discover_pages_missing_dir() {
        let temp = TempDir::new().unwrap();
        let err = discover_pages(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_report_counts() {
        let report = BundleReport {
            assets: vec![
                AssetReport {
                    name: "a".into(),
                    outcome: AssetOutcome::Skipped(SkipReason::NotHtml),
                },
                AssetReport {
                    name: "b".into(),
                    outcome: AssetOutcome::Bundled {
                        page: "b.html".into(),
                        bundle_file: "x.js".into(),
                        script_path: "/_astro/x.js".into(),
                        modules: vec![],
                    },
                },
            ],
            ..Default::default()
        };
        assert_eq!(report.bundled().count(), 1);
        assert_eq!(report.skipped().count(), 1);
        assert!(report.found_islands());
    }
}
