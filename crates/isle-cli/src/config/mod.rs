//! Configuration with multi-source loading.
//!
//! Merges `isle.config.json`, `ISLE_*` environment variables and CLI flags.
//! Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod validation;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use defaults::*;
pub use loading::CONFIG_FILE;

use crate::error::Result;
use isle_bundler::BundleOptions;

/// isle configuration - loaded from isle.config.json, the environment, or CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IsleConfig {
    /// Module directory inside the build output directory (e.g. "_astro")
    #[serde(default = "default_assets_dir", alias = "assets_dir")]
    pub assets_dir: String,

    /// Delete the bundled modules once every page is patched
    #[serde(default = "default_remove_orphans", alias = "remove_orphans")]
    pub remove_orphans: bool,

    /// Report what would be bundled without touching any file
    #[serde(default, alias = "dry_run")]
    pub dry_run: bool,
}

impl Default for IsleConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl IsleConfig {
    /// Options for the bundling pass.
    pub fn to_bundle_options(&self) -> BundleOptions {
        BundleOptions::new()
            .assets_dir(self.assets_dir.clone())
            .remove_orphans(self.remove_orphans)
            .dry_run(self.dry_run)
    }

    /// JSON schema of `isle.config.json`.
    pub fn json_schema() -> Result<serde_json::Value> {
        let schema = schemars::schema_for!(IsleConfig);
        Ok(serde_json::to_value(schema)?)
    }
}
