//! Core domain types and host port definitions for vocable.
//!
//! `vocable-core` has no host dependency: the speech engine, the recording
//! sink and the file-save interaction are all described as traits in
//! [`ports`] and implemented by adapter crates (`vocable-web` in the browser,
//! hand-written mocks in tests).

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod ports;
pub mod settings;
pub mod timing;

// Re-export commonly used types for convenience
pub use domain::{
    AudioBlob, PITCH_RANGE, PlaybackSnapshot, PlaybackState, RATE_RANGE, TtsRequest, Utterance,
    VOLUME_RANGE, Voice, VoiceSettings, WAV_MIME,
};
pub use error::{
    CaptureError, DownloadError, ExportError, FallbackError, SpeechError, SynthesisErrorCode,
};
pub use ports::{
    AudioRecorder, FileSaver, NoopRecorder, NoopRecordingHost, NoopSpeechEngine, RecorderEvent,
    RecorderSender, RecordingHost, RemoteSynthesizer, SpeechEngine, UtteranceEvent,
    UtteranceSender,
};
pub use settings::{DEFAULT_CAPTURE_GRACE_MS, Settings, SettingsError, validate_settings};
pub use timing::{WORDS_PER_MINUTE, estimate_duration, format_time, word_count};
