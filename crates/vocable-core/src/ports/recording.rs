//! Media recording port.

use tokio::sync::mpsc;

use crate::error::CaptureError;

/// Channel on which a recorder reports buffered data and its final state.
pub type RecorderSender = mpsc::UnboundedSender<RecorderEvent>;

/// Signal from an active recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    /// A chunk of encoded audio.
    Data(Vec<u8>),

    /// The recorder finished; no data follows.
    Stopped,

    /// The recorder failed; no data follows.
    Failed(String),
}

/// Host factory for recorders bound to a fresh audio context.
pub trait RecordingHost {
    type Recorder: AudioRecorder;

    /// Capability probe; no instance is required.
    fn is_supported() -> bool
    where
        Self: Sized;

    /// Create an audio context and a recording sink bound to its output.
    fn open(&self) -> Result<Self::Recorder, CaptureError>;
}

/// A recording sink plus the audio context it is bound to.
///
/// All methods take `&self`; adapters use interior mutability.
pub trait AudioRecorder {
    /// Begin buffering audio, reporting chunks on `events`.
    fn start(&self, events: RecorderSender) -> Result<(), CaptureError>;

    /// Stop recording. The recorder must eventually report
    /// [`RecorderEvent::Stopped`] or [`RecorderEvent::Failed`].
    fn stop(&self);

    /// Release the audio context. Safe to call more than once.
    fn release(&self);
}
