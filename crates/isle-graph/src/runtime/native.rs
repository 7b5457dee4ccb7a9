//! Native Runtime Implementation
//!
//! `std::fs` wrapped in the `Runtime` trait so the bundling engine stays
//! platform-agnostic and testable against in-memory runtimes.

// NativeRuntime is platform-specific and wraps std::fs by design
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::task;

use super::{Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
///
/// Blocking `std::fs` calls run on tokio's blocking pool so an async host is
/// never stalled by disk I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    /// Create a new NativeRuntime instance.
    pub fn new() -> Self {
        Self
    }
}

fn map_io_error(path: &Path, action: &str, err: std::io::Error) -> RuntimeError {
    if err.kind() == std::io::ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io(format!("Failed to {} {}: {}", action, path.display(), err))
    }
}

async fn blocking<T, F>(f: F) -> RuntimeResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RuntimeResult<T> + Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| RuntimeError::Other(format!("Task join error: {}", e)))?
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path: PathBuf = path.to_path_buf();
        blocking(move || std::fs::read(&path).map_err(|e| map_io_error(&path, "read", e))).await
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        let path: PathBuf = path.to_path_buf();
        let content = content.to_vec();
        blocking(move || {
            std::fs::write(&path, content).map_err(|e| map_io_error(&path, "write", e))
        })
        .await
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn remove_file(&self, path: &Path) -> RuntimeResult<()> {
        let path: PathBuf = path.to_path_buf();
        blocking(move || {
            std::fs::remove_file(&path).map_err(|e| map_io_error(&path, "remove", e))
        })
        .await
    }
}
