//! Host build integration.
//!
//! A static-site build hands its finished assets to each registered
//! integration once, after every page has been written.

use async_trait::async_trait;
use isle_graph::Runtime;
use std::path::Path;
use std::sync::Arc;

use crate::{AssetMap, BundleOptions, BundleReport, Result, bundle_islands};

/// Hook invoked when a build has finished writing its output.
#[async_trait]
pub trait Integration: Send + Sync {
    /// Stable integration name, used in logs.
    fn name(&self) -> &'static str;

    /// Post-process the build output in `dir`.
    async fn build_done(&self, assets: &AssetMap, dir: &Path) -> Result<BundleReport>;
}

/// Bundles every page's islands into a single script.
#[derive(Debug, Clone)]
pub struct IslandsIntegration {
    runtime: Arc<dyn Runtime>,
    options: BundleOptions,
}

impl IslandsIntegration {
    pub const NAME: &'static str = "isle-bundle-islands";

    /// Integration on the native filesystem.
    #[cfg(not(target_family = "wasm"))]
    pub fn new(options: BundleOptions) -> Self {
        Self::with_runtime(Arc::new(isle_graph::NativeRuntime::new()), options)
    }

    pub fn with_runtime(runtime: Arc<dyn Runtime>, options: BundleOptions) -> Self {
        Self { runtime, options }
    }

    pub fn options(&self) -> &BundleOptions {
        &self.options
    }
}

#[async_trait]
impl Integration for IslandsIntegration {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn build_done(&self, assets: &AssetMap, dir: &Path) -> Result<BundleReport> {
        tracing::debug!(integration = Self::NAME, "build done");
        bundle_islands(self.runtime.as_ref(), assets, dir, &self.options).await
    }
}
