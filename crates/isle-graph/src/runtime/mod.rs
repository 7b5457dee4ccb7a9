//! Platform runtime abstraction for the island bundler
//!
//! This module defines the `Runtime` trait that abstracts the whole-file
//! operations the bundler needs: reading pages and modules, writing the
//! bundle and the patched page, and deleting orphaned modules. The engine
//! never touches `std::fs` directly.

#[cfg(not(target_family = "wasm"))]
pub mod native;

// Test utilities (available in test builds)
#[cfg(any(
    all(test, not(target_family = "wasm")),
    all(feature = "test-utils", not(target_family = "wasm"))
))]
pub mod test_utils;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

impl RuntimeError {
    /// Whether this error means the target simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RuntimeError::FileNotFound(_))
    }
}

/// Platform runtime trait
///
/// Implementations provide whole-file access. There are no partial writes,
/// no atomic renames and no directory management.
///
/// # Example
///
/// ```rust,ignore
/// use isle_graph::runtime::{Runtime, RuntimeResult};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct MyRuntime;
///
/// #[async_trait]
/// impl Runtime for MyRuntime {
///     async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
///         // Platform-specific implementation
///     }
///
///     // ... implement other methods
/// }
/// ```
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a whole file
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Write a whole file, replacing any previous content
    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file
    ///
    /// Returns `RuntimeError::FileNotFound` when the file is already gone.
    async fn remove_file(&self, path: &Path) -> RuntimeResult<()>;
}
