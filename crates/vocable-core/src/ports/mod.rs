//! Host ports: trait abstractions over the capabilities vocable delegates.
//!
//! | Port | Host capability |
//! |---|---|
//! | [`SpeechEngine`] | Speech synthesis: submit, pause, resume, cancel, enumerate voices |
//! | [`RecordingHost`] / [`AudioRecorder`] | Audio context plus a recording sink bound to its output |
//! | [`FileSaver`] | Save-as interaction for a blob |
//! | [`RemoteSynthesizer`] | Optional network synthesis when the host has none |
//!
//! Host callbacks are translated into events on unbounded `tokio` channels,
//! so adapters never call back into vocable directly. None of the traits
//! require `Send`: browser hosts are single-threaded and their handles are
//! not thread-safe.

mod noop;
mod recording;
mod remote;
mod saver;
mod speech;

pub use noop::{NoopRecorder, NoopRecordingHost, NoopSpeechEngine};
pub use recording::{AudioRecorder, RecorderEvent, RecorderSender, RecordingHost};
pub use remote::RemoteSynthesizer;
pub use saver::FileSaver;
pub use speech::{SpeechEngine, UtteranceEvent, UtteranceSender};
