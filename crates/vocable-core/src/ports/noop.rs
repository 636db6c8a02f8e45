//! No-op host adapters for environments without the capability.

use crate::domain::{Utterance, Voice};
use crate::error::{CaptureError, SpeechError};
use crate::ports::{AudioRecorder, RecorderSender, RecordingHost, SpeechEngine, UtteranceSender};

/// Speech engine for hosts with no synthesis at all.
///
/// The probe reports unsupported, so controllers refuse to speak before
/// reaching [`SpeechEngine::speak`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpeechEngine;

impl SpeechEngine for NoopSpeechEngine {
    fn is_supported() -> bool {
        false
    }

    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&self, _utterance: &Utterance, _events: UtteranceSender) -> Result<(), SpeechError> {
        Err(SpeechError::UnsupportedPlatform)
    }

    fn pause(&self) {}

    fn resume(&self) {}

    fn cancel(&self) {}
}

/// Recording host for environments with no media recording.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecordingHost;

/// Recorder type of [`NoopRecordingHost`]; never constructed by it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl RecordingHost for NoopRecordingHost {
    type Recorder = NoopRecorder;

    fn is_supported() -> bool {
        false
    }

    fn open(&self) -> Result<Self::Recorder, CaptureError> {
        Err(CaptureError::Unsupported)
    }
}

impl AudioRecorder for NoopRecorder {
    fn start(&self, _events: RecorderSender) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    fn stop(&self) {}

    fn release(&self) {}
}
