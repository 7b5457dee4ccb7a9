//! Test utilities for isle crates.
//!
//! `TestRuntime` keeps every file in memory so tests can assert on exactly
//! which files were written, patched and deleted without touching disk.

use async_trait::async_trait;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use super::{Runtime, RuntimeError, RuntimeResult};

/// In-memory runtime for tests.
///
/// A directory "exists" when at least one stored file lives below it.
///
/// ```rust,ignore
/// let runtime = TestRuntime::new()
///     .with_file("/dist/index.html", "<script src=\"/_astro/a.js\"></script>")
///     .with_file("/dist/_astro/a.js", "export { a }");
/// ```
#[derive(Debug, Default)]
pub struct TestRuntime {
    files: RwLock<FxHashMap<PathBuf, Vec<u8>>>,
}

impl TestRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style file insertion.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.write().insert(path.into(), content.into());
    }

    /// Content of a stored file as UTF-8 text.
    pub fn read_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .read()
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Sorted paths of every stored file below `dir`.
    pub fn files_in(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        let mut paths: Vec<PathBuf> = self
            .files
            .read()
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl Runtime for TestRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        self.insert(path, content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .keys()
            .any(|file| file == path || file.starts_with(path))
    }

    async fn remove_file(&self, path: &Path) -> RuntimeResult<()> {
        self.files
            .write()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_exists_through_files() {
        let runtime = TestRuntime::new().with_file("/dist/_astro/a.js", "a");

        assert!(runtime.exists(Path::new("/dist/_astro")));
        assert!(runtime.exists(Path::new("/dist/_astro/a.js")));
        assert!(!runtime.exists(Path::new("/dist/other")));

        runtime.remove_file(Path::new("/dist/_astro/a.js")).await.unwrap();
        assert!(!runtime.exists(Path::new("/dist/_astro")));
    }
}
