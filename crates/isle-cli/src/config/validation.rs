use crate::config::IsleConfig;
use crate::error::{ConfigError, Result};

impl IsleConfig {
    /// Validate configuration before running the bundler.
    pub fn validate(&self) -> Result<()> {
        match self.to_bundle_options().validate() {
            Ok(()) => Ok(()),
            Err(isle_bundler::Error::InvalidConfig(message)) => Err(ConfigError::InvalidValue {
                field: "assetsDir".to_string(),
                value: self.assets_dir.clone(),
                hint: format!(
                    "{message}. Use the name of the build's module directory, e.g. \"_astro\""
                ),
            }
            .into()),
            Err(other) => Err(other.into()),
        }
    }
}
