use crate::cli::BundleArgs;
use crate::config::{IsleConfig, default_assets_dir, default_remove_orphans};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::Path;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "isle.config.json";

/// Only the flags the user actually passed.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    assets_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remove_orphans: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dry_run: Option<bool>,
}

impl IsleConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// `--config` and the default `isle.config.json` are resolved against `cwd`.
    pub fn load(args: &BundleArgs, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        let config_file = match &args.config {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => {
                let default_path = cwd.join(CONFIG_FILE);
                default_path.is_file().then_some(default_path)
            }
        };

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        // ISLE_ASSETS_DIR, ISLE_REMOVE_ORPHANS, ISLE_DRY_RUN
        figment = figment.merge(
            Env::prefixed("ISLE_").only(&["assets_dir", "remove_orphans", "dry_run"]),
        );

        figment = figment.merge(Serialized::defaults(Self::overrides_from_args(args)));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: "Check isle.config.json syntax and field types".to_string(),
            }
            .into()
        })
    }

    fn overrides_from_args(args: &BundleArgs) -> CliOverrides {
        CliOverrides {
            assets_dir: args.assets_dir.clone(),
            remove_orphans: args.keep_modules.then_some(false),
            dry_run: args.dry_run.then_some(true),
        }
    }

    /// Get default configuration values.
    pub(crate) fn default_config() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            remove_orphans: default_remove_orphans(),
            dry_run: false,
        }
    }
}
