//! Settings domain types and validation.
//!
//! These are pure types: loading them from the environment is the job of
//! the binary that embeds vocable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{PITCH_RANGE, RATE_RANGE, VOLUME_RANGE};

/// Default delay between the end of an utterance and stopping the recorder.
pub const DEFAULT_CAPTURE_GRACE_MS: u64 = 500;

/// Longest grace period accepted by validation.
const MAX_CAPTURE_GRACE_MS: u64 = 10_000;

/// Application settings.
///
/// Unset fields fall back to host or built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Endpoint of the network synthesis fallback.
    pub fallback_url: Option<String>,

    /// Grace period after an utterance ends before the capture recorder stops.
    pub capture_grace_ms: Option<u64>,

    /// Directory exported audio is saved into (native hosts only).
    pub download_dir: Option<String>,

    /// Preferred voice name.
    pub default_voice: Option<String>,

    pub default_rate: Option<f32>,

    pub default_pitch: Option<f32>,

    pub default_volume: Option<f32>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            fallback_url: None,
            capture_grace_ms: Some(DEFAULT_CAPTURE_GRACE_MS),
            download_dir: None,
            default_voice: None,
            default_rate: Some(1.0),
            default_pitch: Some(1.0),
            default_volume: Some(1.0),
        }
    }

    /// Get the effective capture grace period (with default fallback).
    #[must_use]
    pub const fn effective_capture_grace(&self) -> Duration {
        match self.capture_grace_ms {
            Some(ms) => Duration::from_millis(ms),
            None => Duration::from_millis(DEFAULT_CAPTURE_GRACE_MS),
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Fallback URL must be an absolute http(s) URL, got {0:?}")]
    InvalidFallbackUrl(String),

    #[error("Capture grace period must be at most {max} ms, got {0}", max = MAX_CAPTURE_GRACE_MS)]
    InvalidGracePeriod(u64),

    #[error("{name} must be within {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("Download directory cannot be empty")]
    EmptyDownloadDir,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    // Validate fallback endpoint
    if let Some(ref raw) = settings.fallback_url {
        let valid = url::Url::parse(raw)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
        if !valid {
            return Err(SettingsError::InvalidFallbackUrl(raw.clone()));
        }
    }

    // Validate grace period
    if let Some(grace) = settings.capture_grace_ms {
        if grace > MAX_CAPTURE_GRACE_MS {
            return Err(SettingsError::InvalidGracePeriod(grace));
        }
    }

    // Validate voice parameters
    for (name, value, range) in [
        ("Rate", settings.default_rate, &RATE_RANGE),
        ("Pitch", settings.default_pitch, &PITCH_RANGE),
        ("Volume", settings.default_volume, &VOLUME_RANGE),
    ] {
        if let Some(value) = value {
            if !range.contains(&value) {
                return Err(SettingsError::OutOfRange {
                    name,
                    value,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }
    }

    // Validate download dir if specified
    if settings
        .download_dir
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyDownloadDir);
    }

    Ok(())
}
