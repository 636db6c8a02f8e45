//! Speech playback, best-effort capture and export for vocable.
//!
//! This crate drives the host ports defined in `vocable-core`:
//!
//! - [`SpeechController`]: live playback with pause/resume/stop
//! - [`AudioCaptureBridge`]: records one utterance into an [`AudioBlob`](vocable_core::AudioBlob)
//! - [`FallbackClient`]: HTTP synthesis when the host has no engine
//! - [`AudioExporter`]: picks capture or fallback
//! - [`DownloadHelper`]: hands the result to the host save interaction

#![deny(unused_crate_dependencies)]

pub mod capture;
pub mod controller;
pub mod download;
pub mod export;
pub mod fallback;
mod timer;

pub use capture::AudioCaptureBridge;
pub use controller::SpeechController;
#[cfg(not(target_arch = "wasm32"))]
pub use download::DirectorySaver;
pub use download::{DownloadHelper, default_filename, filename_at};
pub use export::AudioExporter;
pub use fallback::FallbackClient;

// Dev-dependencies used only by integration tests
#[cfg(test)]
use axum as _;
