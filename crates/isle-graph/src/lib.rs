//! # isle-graph
//!
//! Module syntax scanning and per-page dependency graphs for island bundles.
//!
//! Component-island builds emit one small ES module per island plus shared
//! chunks, all in a flat output directory. This crate answers two questions
//! about those files for a single page:
//!
//! - which import and export statements does each module contain
//!   ([`syntax::parse_module`]), and
//! - in which order must the modules run so that every module sees its
//!   dependencies initialized ([`ModuleGraph`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use isle_graph::{ModuleGraph, ModuleName, NativeRuntime};
//! use std::path::Path;
//!
//! # async fn run() -> isle_graph::Result<()> {
//! let runtime = NativeRuntime::new();
//! let roots = vec![ModuleName::from_reference("/_astro/main.js").unwrap()];
//!
//! let graph = ModuleGraph::load(&runtime, Path::new("dist/_astro"), &roots).await?;
//! for (name, module) in graph.order(&roots)?.iter() {
//!     println!("{name}: {} imports", module.syntax.imports.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Supported module grammar
//!
//! Only the statements island compilers emit are accepted: named imports,
//! side-effect imports and a single local export list. Anything else in the
//! module grammar is reported as [`Error::UnsupportedSyntax`] instead of being
//! silently mis-bundled.

pub mod runtime;

mod error;
pub mod graph;
mod module_name;
mod ordered_map;
pub mod syntax;

pub use error::{Error, Result};
pub use graph::{LoadedModule, ModuleGraph, read_text};
pub use module_name::ModuleName;
pub use ordered_map::ModuleMap;
pub use syntax::{
    ExportBinding, ExportDecl, ImportBinding, ImportDecl, ModuleSyntax, SyntaxError, SyntaxIssue,
    parse_module,
};

// Re-export runtime types
pub use runtime::{Runtime, RuntimeError, RuntimeResult};

#[cfg(not(target_family = "wasm"))]
pub use runtime::native::NativeRuntime;

// Test utilities (available in test builds)
#[cfg(any(
    all(test, not(target_family = "wasm")),
    all(feature = "test-utils", not(target_family = "wasm"))
))]
pub use runtime::test_utils::TestRuntime;

#[cfg(test)]
mod tests;
