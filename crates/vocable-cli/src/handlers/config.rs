//! `vocable config`: print the effective settings.

use anyhow::Result;
use vocable_core::Settings;

/// Execute the config command.
pub fn execute(settings: &Settings) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
