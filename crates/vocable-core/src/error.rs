//! Error types for speech, capture, download and fallback operations.
//!
//! Errors are classified and reported to the immediate caller; nothing in
//! vocable retries or renders them.

use std::fmt;

use thiserror::Error;

/// Error code reported by the host engine when an utterance fails.
///
/// Known codes mirror the Web Speech API; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SynthesisErrorCode {
    Canceled,
    Interrupted,
    AudioBusy,
    AudioHardware,
    Network,
    SynthesisUnavailable,
    SynthesisFailed,
    LanguageUnavailable,
    VoiceUnavailable,
    TextTooLong,
    InvalidArgument,
    NotAllowed,
    Other(String),
}

impl SynthesisErrorCode {
    /// Parse a host-reported code string.
    pub fn from_host(code: &str) -> Self {
        match code {
            "canceled" => Self::Canceled,
            "interrupted" => Self::Interrupted,
            "audio-busy" => Self::AudioBusy,
            "audio-hardware" => Self::AudioHardware,
            "network" => Self::Network,
            "synthesis-unavailable" => Self::SynthesisUnavailable,
            "synthesis-failed" => Self::SynthesisFailed,
            "language-unavailable" => Self::LanguageUnavailable,
            "voice-unavailable" => Self::VoiceUnavailable,
            "text-too-long" => Self::TextTooLong,
            "invalid-argument" => Self::InvalidArgument,
            "not-allowed" => Self::NotAllowed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Canceled => "canceled",
            Self::Interrupted => "interrupted",
            Self::AudioBusy => "audio-busy",
            Self::AudioHardware => "audio-hardware",
            Self::Network => "network",
            Self::SynthesisUnavailable => "synthesis-unavailable",
            Self::SynthesisFailed => "synthesis-failed",
            Self::LanguageUnavailable => "language-unavailable",
            Self::VoiceUnavailable => "voice-unavailable",
            Self::TextTooLong => "text-too-long",
            Self::InvalidArgument => "invalid-argument",
            Self::NotAllowed => "not-allowed",
            Self::Other(code) => code,
        }
    }

    /// Whether the utterance ended because something cancelled it rather
    /// than because synthesis failed.
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Canceled | Self::Interrupted)
    }
}

impl fmt::Display for SynthesisErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from live speech playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// The host does not expose the speech-synthesis primitives.
    #[error("Speech synthesis is not supported on this platform")]
    UnsupportedPlatform,

    /// The host engine reported a failure mid-utterance.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(SynthesisErrorCode),

    /// The host refused to accept the utterance.
    #[error("Speech engine rejected the utterance: {0}")]
    Rejected(String),

    /// The host dropped the utterance without reporting an end or an error.
    #[error("Speech engine disconnected before the utterance finished")]
    Disconnected,
}

/// Errors from capturing synthesized speech into an audio blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The host lacks speech synthesis or media recording.
    #[error("Audio capture is not supported on this platform")]
    Unsupported,

    /// Creating the audio context or the recorder failed.
    #[error("Failed to set up audio capture: {0}")]
    Setup(String),

    /// The recorder failed while recording or finalizing.
    #[error("Audio recorder failed: {0}")]
    Recorder(String),

    /// The utterance being captured failed.
    #[error("Speech synthesis failed during capture: {0}")]
    Synthesis(SynthesisErrorCode),

    /// The capture was cancelled by the caller.
    #[error("Audio capture cancelled")]
    Cancelled,
}

impl From<SpeechError> for CaptureError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::UnsupportedPlatform => Self::Unsupported,
            SpeechError::Synthesis(code) => Self::Synthesis(code),
            SpeechError::Rejected(message) => Self::Setup(message),
            SpeechError::Disconnected => Self::Synthesis(SynthesisErrorCode::Other(
                "disconnected".to_string(),
            )),
        }
    }
}

/// Errors from saving an audio blob.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The filename is empty or would escape the target location.
    #[error("Invalid download filename: {0:?}")]
    InvalidFilename(String),

    /// IO error writing the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The host save interaction failed.
    #[error("Host download failed: {0}")]
    Host(String),
}

/// Errors from the network synthesis fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackError {
    /// No fallback endpoint is configured.
    #[error("No fallback synthesis endpoint configured")]
    NotConfigured,

    /// The configured endpoint is not a valid http(s) URL.
    #[error("Invalid fallback endpoint: {0}")]
    InvalidEndpoint(String),

    /// The request could not be sent or the body could not be read.
    #[error("Fallback request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("Fallback endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The endpoint answered with an error payload.
    #[error("Fallback endpoint rejected the request: {0}")]
    Rejected(String),

    /// The endpoint answered with no audio.
    #[error("Fallback endpoint returned an empty audio payload")]
    EmptyPayload,
}

/// Errors from producing a downloadable blob through any available path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Neither host capture nor a fallback endpoint is available.
    #[error("No way to export audio: host capture is unsupported and no fallback is configured")]
    Unsupported,

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Fallback(#[from] FallbackError),
}
