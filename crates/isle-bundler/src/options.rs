//! Options for a bundling pass.

use crate::{Error, Result};

/// Default name of the build's module output directory.
pub const DEFAULT_ASSETS_DIR: &str = "_astro";

/// Options for [`bundle_islands`](crate::bundle_islands).
///
/// ```rust
/// use isle_bundler::BundleOptions;
///
/// let options = BundleOptions::new()
///     .assets_dir("assets")
///     .remove_orphans(false);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    /// Module directory, relative to the build output directory.
    pub assets_dir: String,
    /// Delete bundled modules after every page has been processed.
    pub remove_orphans: bool,
    /// Compute bundles without writing, patching or deleting anything.
    pub dry_run: bool,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            remove_orphans: true,
            dry_run: false,
        }
    }
}

impl BundleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets_dir(mut self, assets_dir: impl Into<String>) -> Self {
        self.assets_dir = assets_dir.into();
        self
    }

    pub fn remove_orphans(mut self, remove_orphans: bool) -> Self {
        self.remove_orphans = remove_orphans;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The module directory must be a single plain path segment.
    pub fn validate(&self) -> Result<()> {
        let dir = self.assets_dir.as_str();
        if dir.is_empty() {
            return Err(Error::InvalidConfig("assetsDir must not be empty".into()));
        }
        if dir == "." || dir == ".." || dir.contains(['/', '\\', '"']) {
            return Err(Error::InvalidConfig(format!(
                "assetsDir must be a single directory name, got '{dir}'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BundleOptions::default();
        assert_eq!(options.assets_dir, "_astro");
        assert!(options.remove_orphans);
        assert!(!options.dry_run);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_rejects_nested_or_empty_dirs() {
        for dir in ["", ".", "..", "a/b", "..\\x", "a\"b"] {
            let err = BundleOptions::new().assets_dir(dir).validate().unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)), "accepted {dir:?}");
        }
    }
}
