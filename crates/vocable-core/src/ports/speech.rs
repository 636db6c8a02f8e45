//! Speech-synthesis engine port.

use tokio::sync::mpsc;

use crate::domain::{Utterance, Voice};
use crate::error::{SpeechError, SynthesisErrorCode};

/// Channel on which the host reports the lifecycle of one utterance.
pub type UtteranceSender = mpsc::UnboundedSender<UtteranceEvent>;

/// Lifecycle signal for a submitted utterance.
///
/// For a given utterance the host reports `Start`, then any number of
/// `Pause`/`Resume`/`Boundary`, then exactly one of `End` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceEvent {
    Start,
    Pause,
    Resume,
    /// A word or sentence boundary was reached at this character offset.
    Boundary { char_index: u32 },
    End,
    Error(SynthesisErrorCode),
}

/// The host's speech-synthesis engine.
///
/// The engine is process-wide on every real host: `cancel` on one handle
/// interrupts utterances submitted through any other handle.
pub trait SpeechEngine {
    /// Capability probe; no engine instance is required.
    ///
    /// Must not panic when the host primitives are absent.
    fn is_supported() -> bool
    where
        Self: Sized;

    /// Voices the host currently offers.
    fn voices(&self) -> Vec<Voice>;

    /// Queue an utterance and report its lifecycle on `events`.
    ///
    /// An `Err` means the host refused the utterance synchronously and no
    /// events will follow.
    fn speak(&self, utterance: &Utterance, events: UtteranceSender) -> Result<(), SpeechError>;

    fn pause(&self);

    fn resume(&self);

    /// Drop every queued and speaking utterance.
    fn cancel(&self);
}
