//! Schema command implementation.

use crate::config::IsleConfig;
use crate::error::{Result, ResultExt};

/// Print the JSON schema of `isle.config.json` to stdout.
pub fn execute() -> Result<()> {
    let schema = IsleConfig::json_schema().context("Failed to generate config schema")?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
