//! Export through whichever synthesis path the host offers.

use vocable_core::{
    AudioBlob, ExportError, RecordingHost, RemoteSynthesizer, SpeechEngine, TtsRequest,
};

use crate::capture::AudioCaptureBridge;
use crate::fallback::FallbackClient;

/// Produces a downloadable blob via host capture, or the network fallback
/// when the host cannot capture.
pub struct AudioExporter<E, R, F = FallbackClient> {
    capture: AudioCaptureBridge<E, R>,
    fallback: Option<F>,
}

impl<E, R, F> AudioExporter<E, R, F>
where
    E: SpeechEngine,
    R: RecordingHost,
    F: RemoteSynthesizer,
{
    pub const fn new(capture: AudioCaptureBridge<E, R>, fallback: Option<F>) -> Self {
        Self { capture, fallback }
    }

    pub const fn capture_bridge(&self) -> &AudioCaptureBridge<E, R> {
        &self.capture
    }

    pub const fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Synthesize `request` into an audio blob.
    pub async fn export(&self, request: &TtsRequest) -> Result<AudioBlob, ExportError> {
        if AudioCaptureBridge::<E, R>::is_supported() {
            tracing::debug!("Exporting through host capture");
            let blob = self
                .capture
                .capture(&request.text, &request.settings())
                .await?;
            return Ok(blob);
        }

        match &self.fallback {
            Some(fallback) => {
                tracing::debug!("Host capture unavailable, exporting through fallback");
                Ok(fallback.synthesize(request).await?)
            }
            None => Err(ExportError::Unsupported),
        }
    }
}
