//! Settings loaded from `VOCABLE_*` environment variables.
//!
//! `.env` files are loaded by the binary before this runs.

use std::str::FromStr;

use anyhow::{Context, Result};
use vocable_core::{Settings, validate_settings};

pub const ENV_FALLBACK_URL: &str = "VOCABLE_FALLBACK_URL";
pub const ENV_CAPTURE_GRACE_MS: &str = "VOCABLE_CAPTURE_GRACE_MS";
pub const ENV_DOWNLOAD_DIR: &str = "VOCABLE_DOWNLOAD_DIR";
pub const ENV_VOICE: &str = "VOCABLE_VOICE";
pub const ENV_RATE: &str = "VOCABLE_RATE";
pub const ENV_PITCH: &str = "VOCABLE_PITCH";
pub const ENV_VOLUME: &str = "VOCABLE_VOLUME";

/// Load and validate settings from the process environment.
pub fn settings_from_env() -> Result<Settings> {
    settings_from_lookup(|key| std::env::var(key).ok())
}

/// Load and validate settings through `lookup`; blank values count as unset.
pub fn settings_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Settings> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut settings = Settings::with_defaults();

    if let Some(url) = get(ENV_FALLBACK_URL) {
        settings.fallback_url = Some(url);
    }
    if let Some(dir) = get(ENV_DOWNLOAD_DIR) {
        settings.download_dir = Some(dir);
    }
    if let Some(voice) = get(ENV_VOICE) {
        settings.default_voice = Some(voice);
    }
    if let Some(grace) = parse(ENV_CAPTURE_GRACE_MS, get(ENV_CAPTURE_GRACE_MS))? {
        settings.capture_grace_ms = Some(grace);
    }
    if let Some(rate) = parse(ENV_RATE, get(ENV_RATE))? {
        settings.default_rate = Some(rate);
    }
    if let Some(pitch) = parse(ENV_PITCH, get(ENV_PITCH))? {
        settings.default_pitch = Some(pitch);
    }
    if let Some(volume) = parse(ENV_VOLUME, get(ENV_VOLUME))? {
        settings.default_volume = Some(volume);
    }

    validate_settings(&settings).context("Invalid vocable configuration")?;
    Ok(settings)
}

fn parse<T>(key: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(|value| {
        value
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {value:?}"))
    })
    .transpose()
}
