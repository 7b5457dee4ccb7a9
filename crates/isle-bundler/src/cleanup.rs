//! Removal of modules that were embedded into bundles.

use isle_graph::{ModuleMap, ModuleName, Runtime};
use std::path::Path;
use tracing::{debug, warn};

/// Delete every module in `modules` from `module_dir`.
///
/// Files that are already gone are skipped and a missing module directory
/// ends cleanup quietly. Other failures are logged and cleanup moves on to the
/// next module. Returns the modules that were actually deleted.
pub async fn remove_orphans(
    runtime: &dyn Runtime,
    module_dir: &Path,
    modules: &ModuleMap<()>,
) -> Vec<ModuleName> {
    if !runtime.exists(module_dir) {
        debug!(dir = %module_dir.display(), "Module directory is gone, nothing to clean up");
        return Vec::new();
    }

    let mut removed = Vec::with_capacity(modules.len());
    for name in modules.keys() {
        let path = module_dir.join(name.as_str());
        match runtime.remove_file(&path).await {
            Ok(()) => {
                debug!(module = %name, "Removed bundled module");
                removed.push(name.clone());
            }
            Err(err) if err.is_not_found() => {
                debug!(module = %name, "Bundled module already removed");
            }
            Err(err) => {
                warn!(module = %name, error = %err, "Failed to remove bundled module");
            }
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use isle_graph::TestRuntime;

    fn set(names: &[&str]) -> ModuleMap<()> {
        let mut map = ModuleMap::new();
        for name in names {
            map.insert_if_absent(ModuleName::from_reference(name).unwrap(), ());
        }
        map
    }

    #[tokio::test]
    async fn test_removes_listed_modules_and_skips_missing() {
        let runtime = TestRuntime::new()
            .with_file("/dist/_astro/a.js", "a")
            .with_file("/dist/_astro/c.js", "c")
            .with_file("/dist/_astro/keep.js", "k");

        let removed =
            remove_orphans(&runtime, Path::new("/dist/_astro"), &set(&["a.js", "b.js", "c.js"]))
                .await;

        let removed: Vec<_> = removed.iter().map(ModuleName::as_str).collect();
        assert_eq!(removed, ["a.js", "c.js"]);
        assert_eq!(
            runtime.files_in("/dist/_astro"),
            vec![Path::new("/dist/_astro/keep.js").to_path_buf()]
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_a_no_op() {
        let runtime = TestRuntime::new().with_file("/dist/index.html", "");
        let removed = remove_orphans(&runtime, Path::new("/dist/_astro"), &set(&["a.js"])).await;
        assert!(removed.is_empty());
    }
}
