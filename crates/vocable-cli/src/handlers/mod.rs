//! Command handlers.

pub mod config;
pub mod estimate;
pub mod export;

use std::io::Read;

use anyhow::{Context, Result};

/// Resolve a text argument, reading stdin for `-`.
pub fn read_text(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}
