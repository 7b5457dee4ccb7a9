//! Module identity.
//!
//! Every reference to a module, whether it comes from page markup
//! (`/_astro/Counter.abc123.js`) or from an import specifier
//! (`./Counter.abc123.js?v=2`), collapses to the file's base name. Two
//! references with the same base name are the same module.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Base name of a JavaScript module file, e.g. `client.B1x9.js`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleName(Arc<str>);

impl ModuleName {
    /// Derive the module name from a raw reference.
    ///
    /// Any query (`?…`) or fragment (`#…`) is dropped first, then everything
    /// up to the last `/` or `\`. Returns `None` when nothing is left.
    pub fn from_reference(reference: &str) -> Option<Self> {
        let end = reference.find(['?', '#']).unwrap_or(reference.len());
        let path = &reference[..end];
        let base = match path.rfind(['/', '\\']) {
            Some(idx) => &path[idx + 1..],
            None => path,
        };

        if base.is_empty() || base == "." || base == ".." {
            return None;
        }
        Some(Self(Arc::from(base)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
