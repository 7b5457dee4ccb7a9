//! Conversion from CLI errors to miette reports.

use crate::error::CliError;
use miette::Report;

/// Convert a [`CliError`] into a miette report for display.
///
/// Bundler errors implement [`miette::Diagnostic`] and keep their code and
/// help text. Everything else is reported by message.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundle(e) => Report::new(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::path::PathBuf;

    #[test]
    fn test_bundle_errors_keep_diagnostic_code() {
        let report = cli_error_to_miette(CliError::Bundle(isle_bundler::Error::InvalidConfig(
            "assetsDir must not be empty".into(),
        )));
        assert_eq!(report.code().unwrap().to_string(), "INVALID_CONFIG");
        assert!(report.help().is_some());
    }

    #[test]
    fn test_config_errors_are_prefixed() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::NotFound(PathBuf::from(
            "site.json",
        ))));
        assert!(report.to_string().starts_with("Configuration error: Config file not found"));
    }
}
