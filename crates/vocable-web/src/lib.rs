//! Browser host adapters for vocable.
//!
//! | Port | Adapter | Browser API |
//! |------|---------|-------------|
//! | `SpeechEngine` | [`WebSpeechEngine`] | `window.speechSynthesis` |
//! | `RecordingHost` | [`WebRecordingHost`] | `AudioContext` + `MediaRecorder` |
//! | `FileSaver` | [`AnchorDownloadSaver`] | object URL + `<a download>` |
//!
//! Every capability probe returns `false` off wasm32 instead of touching
//! the JS bindings.

#![deny(unused_crate_dependencies)]

mod download;
mod js;
mod recorder;
mod speech;

pub use download::AnchorDownloadSaver;
pub use recorder::{WebRecorder, WebRecordingHost};
pub use speech::WebSpeechEngine;
