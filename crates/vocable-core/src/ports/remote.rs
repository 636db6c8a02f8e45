//! Network synthesis port, used when the host has no speech engine.

use crate::domain::{AudioBlob, TtsRequest};
use crate::error::FallbackError;

/// Remote text-to-speech endpoint.
///
/// Futures are `Send` on native targets; in the browser HTTP futures are
/// single-threaded, so the bound is dropped there.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait RemoteSynthesizer {
    async fn synthesize(&self, request: &TtsRequest) -> Result<AudioBlob, FallbackError>;
}
