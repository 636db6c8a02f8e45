//! Domain types shared by every vocable crate.
//!
//! These are pure data types with no host dependencies.

mod audio;
mod playback;
mod voice;

pub use audio::{AudioBlob, WAV_MIME};
pub use playback::{PlaybackSnapshot, PlaybackState};
pub use voice::{
    PITCH_RANGE, RATE_RANGE, TtsRequest, Utterance, VOLUME_RANGE, Voice, VoiceSettings,
};
