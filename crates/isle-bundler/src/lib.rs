//! # isle-bundler
//!
//! Post-build island bundling.
//!
//! Component-island builds ship every island as its own ES module plus a
//! handful of shared chunks. After the build, this crate walks each HTML page,
//! follows the module graph its `.js` references pull in, and replaces those
//! modules with a single script per page:
//!
//! - every module runs inside its own function scope,
//! - static imports become direct references to the generated variables,
//! - a `__imports` registry and an `__import(name)` lookup serve the page's
//!   dynamic `import(...)` calls, which are rewritten to `__import(...)`.
//!   Calls inside the modules themselves stay as written.
//!
//! The original modules are deleted once every page has been patched.
//!
//! ## Quick Start
//!
//! ```no_run
//! use isle_bundler::{BundleOptions, IslandsIntegration, Integration, discover_pages};
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dist = Path::new("dist");
//! let assets = discover_pages(dist)?;
//!
//! let integration = IslandsIntegration::new(BundleOptions::default());
//! let report = integration.build_done(&assets, dist).await?;
//! println!("bundled {} pages", report.bundled().count());
//! # Ok(()) }
//! ```

// Re-export the foundation crate
pub use isle_graph;

pub mod assemble;
pub mod asset;
pub mod cleanup;
pub mod html;
pub mod integration;
mod islands;
pub mod options;
pub mod transform;

pub use assemble::{Bundle, assemble};
pub use asset::{AssetMap, AssetOutcome, AssetReport, BundleReport, SkipReason, discover_pages};
pub use integration::{Integration, IslandsIntegration};
pub use islands::bundle_islands;
pub use options::{BundleOptions, DEFAULT_ASSETS_DIR};
pub use transform::transform_module;

/// Error types for isle-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Module graph error (syntax, cycles, missing modules).
    #[error(transparent)]
    Graph(#[from] isle_graph::Error),

    /// Filesystem error while reading or writing a page or bundle.
    #[error(transparent)]
    Runtime(#[from] isle_graph::RuntimeError),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for isle-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        use isle_graph::Error as GraphError;

        Some(Box::new(match self {
            Error::Graph(GraphError::UnsupportedSyntax { .. }) => "UNSUPPORTED_SYNTAX",
            Error::Graph(GraphError::CyclicDependency { .. }) => "CYCLIC_DEPENDENCY",
            Error::Graph(GraphError::ModuleNotFound { .. }) => "MODULE_NOT_FOUND",
            Error::Graph(GraphError::InvalidUtf8(_)) => "INVALID_UTF8",
            Error::Graph(GraphError::Runtime(_)) | Error::Runtime(_) => "RUNTIME_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) => "IO_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        use isle_graph::Error as GraphError;

        match self {
            Error::Graph(GraphError::UnsupportedSyntax { module, error }) => Some(Box::new(format!(
                "Only named imports, side-effect imports and a single `export {{ ... }}` list can be bundled.\nRebuild '{}' without this statement (line {}).",
                module, error.line
            ))),
            Error::Graph(GraphError::CyclicDependency { .. }) => Some(Box::new(
                "Island modules must not import each other in a loop. Break the cycle by moving the shared code into its own module.",
            )),
            Error::Graph(GraphError::ModuleNotFound { path, .. }) => Some(Box::new(format!(
                "Expected the module at {}.\nCheck that the build finished and that assetsDir matches the build's module directory.",
                path.display()
            ))),
            Error::Graph(GraphError::InvalidUtf8(path)) => Some(Box::new(format!(
                "Pages and modules must be UTF-8 text: {}",
                path.display()
            ))),
            Error::InvalidConfig(msg) => Some(Box::new(format!(
                "Check your configuration file for syntax errors.\nError: {}",
                msg
            ))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isle_graph::ModuleName;
    use miette::Diagnostic;

    #[test]
    fn test_diagnostic_codes() {
        let cycle = Error::from(isle_graph::Error::CyclicDependency {
            cycle: vec![
                ModuleName::from_reference("a.js").unwrap(),
                ModuleName::from_reference("a.js").unwrap(),
            ],
        });
        assert_eq!(cycle.code().unwrap().to_string(), "CYCLIC_DEPENDENCY");
        assert!(cycle.help().is_some());
        assert_eq!(cycle.to_string(), "Cyclic dependency: a.js -> a.js");

        let config = Error::InvalidConfig("bad".into());
        assert_eq!(config.code().unwrap().to_string(), "INVALID_CONFIG");
    }
}
