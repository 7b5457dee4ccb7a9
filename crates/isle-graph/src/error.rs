//! Error types for module loading and ordering.

use std::path::PathBuf;

use crate::ModuleName;
use crate::runtime::RuntimeError;
use crate::syntax::SyntaxError;

/// Errors raised while building a page's module graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A module uses import/export syntax outside the supported subset.
    #[error("Unsupported syntax in {module}: {error}")]
    UnsupportedSyntax {
        module: ModuleName,
        #[source]
        error: SyntaxError,
    },

    /// The import graph contains a cycle. The first and last names are equal.
    #[error("Cyclic dependency: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<ModuleName> },

    /// A referenced module has no file in the module directory.
    #[error("Module not found: {name} (expected at {})", .path.display())]
    ModuleNotFound { name: ModuleName, path: PathBuf },

    /// A page or module is not valid UTF-8.
    #[error("File is not valid UTF-8: {}", .0.display())]
    InvalidUtf8(PathBuf),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

fn format_cycle(cycle: &[ModuleName]) -> String {
    cycle
        .iter()
        .map(ModuleName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;
