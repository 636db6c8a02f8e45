//! Voice parameters: host voices, per-call requests and resolved utterances.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Speaking rate accepted by host engines (1.0 = normal).
pub const RATE_RANGE: RangeInclusive<f32> = 0.1..=10.0;

/// Pitch accepted by host engines (1.0 = normal).
pub const PITCH_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// Volume accepted by host engines (0.0 = muted, 1.0 = full).
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Neutral value for rate, pitch and volume.
const NEUTRAL: f32 = 1.0;

/// One of the voices enumerated by the host speech engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    /// Human-readable voice name, unique per host.
    pub name: String,

    /// BCP 47 language tag (e.g. `"en-US"`).
    pub lang: String,

    /// Host-specific voice URI.
    pub uri: String,

    /// Whether synthesis runs locally rather than through a remote service.
    pub local_service: bool,

    /// Whether this is the host's default voice.
    pub default: bool,
}

impl Voice {
    /// Convenience constructor for a local, non-default voice.
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            uri: name.clone(),
            name,
            lang: lang.into(),
            local_service: true,
            default: false,
        }
    }
}

/// How text should be spoken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettings {
    /// Speaking rate multiplier.
    pub rate: f32,

    /// Pitch multiplier.
    pub pitch: f32,

    /// Output volume.
    pub volume: f32,

    /// Selected voice; `None` uses the host default.
    pub voice: Option<Voice>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            rate: NEUTRAL,
            pitch: NEUTRAL,
            volume: NEUTRAL,
            voice: None,
        }
    }
}

impl VoiceSettings {
    /// Return a copy with every parameter clamped into the host range.
    ///
    /// Non-finite values fall back to the neutral value.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            rate: normalize(self.rate, &RATE_RANGE),
            pitch: normalize(self.pitch, &PITCH_RANGE),
            volume: normalize(self.volume, &VOLUME_RANGE),
            voice: self.voice.clone(),
        }
    }

    /// Build a request that speaks `text` with these settings.
    pub fn request(&self, text: impl Into<String>) -> TtsRequest {
        TtsRequest {
            text: text.into(),
            voice: self.voice.clone(),
            rate: Some(self.rate),
            pitch: Some(self.pitch),
            volume: Some(self.volume),
        }
    }
}

/// A single text-to-speech request (`text` is the only required field).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl TtsRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = Some(voice);
        self
    }

    #[must_use]
    pub const fn with_rate(mut self, rate: f32) -> Self {
        self.rate = Some(rate);
        self
    }

    #[must_use]
    pub const fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = Some(pitch);
        self
    }

    #[must_use]
    pub const fn with_volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Whether the text contains anything to speak.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Settings with absent fields defaulted to the neutral value.
    pub fn settings(&self) -> VoiceSettings {
        VoiceSettings {
            rate: self.rate.unwrap_or(NEUTRAL),
            pitch: self.pitch.unwrap_or(NEUTRAL),
            volume: self.volume.unwrap_or(NEUTRAL),
            voice: self.voice.clone(),
        }
    }
}

/// A fully resolved utterance, ready to hand to the host engine.
///
/// Every numeric parameter is set and inside the host range.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<Voice>,
    pub lang: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for Utterance {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice: None,
            lang: None,
            rate: NEUTRAL,
            pitch: NEUTRAL,
            volume: NEUTRAL,
        }
    }
}

impl Utterance {
    /// Resolve a request, applying defaults and clamping.
    pub fn from_request(request: &TtsRequest) -> Self {
        Self::from_settings(request.text.clone(), &request.settings())
    }

    /// Resolve `text` spoken with `settings`.
    pub fn from_settings(text: impl Into<String>, settings: &VoiceSettings) -> Self {
        let clamped = settings.clamped();
        if clamped != *settings {
            tracing::debug!(
                rate = settings.rate,
                pitch = settings.pitch,
                volume = settings.volume,
                "Voice settings clamped into host range"
            );
        }

        Self {
            text: text.into(),
            lang: clamped.voice.as_ref().map(|v| v.lang.clone()),
            voice: clamped.voice,
            rate: clamped.rate,
            pitch: clamped.pitch,
            volume: clamped.volume,
        }
    }
}

fn normalize(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        NEUTRAL
    }
}
