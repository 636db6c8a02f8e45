//! Playback state machine types.

use serde::{Deserialize, Serialize};

/// Current state of live playback.
///
/// ```text
///   Idle → Playing ⇄ Paused
///    ▲        │        │
///    └────────┴────────┘   (end, error or stop)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    /// No utterance has started, or the last one finished.
    #[default]
    Idle,

    /// The host engine is speaking.
    Playing,

    /// The host engine holds a started utterance but is paused.
    Paused,
}

/// Raw playback flags as observed by UI layers.
///
/// `is_playing` means "the engine holds a started utterance" and stays `true`
/// while paused, so `Paused` is reported as `is_playing && is_paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_idle: bool,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}

impl PlaybackSnapshot {
    /// Build a snapshot from the two flags; `is_idle` is derived.
    #[must_use]
    pub const fn new(is_playing: bool, is_paused: bool) -> Self {
        Self {
            is_playing,
            is_paused,
            is_idle: !is_playing && !is_paused,
        }
    }

    /// The idle snapshot.
    #[must_use]
    pub const fn idle() -> Self {
        Self::new(false, false)
    }

    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        if self.is_paused {
            PlaybackState::Paused
        } else if self.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }
}
