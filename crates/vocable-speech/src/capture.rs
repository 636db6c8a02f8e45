//! Best-effort capture of synthesized speech into an audio blob.
//!
//! A capture opens a fresh audio context with a recorder bound to its
//! output, speaks one utterance, waits a short grace period for the tail of
//! the audio to drain, then stops the recorder and concatenates its chunks.
//!
//! Whether the recorder actually hears the speech depends on host audio
//! routing: browsers render speech synthesis outside any audio context, so
//! the blob may be silent. Callers that need reliable audio should prefer
//! the network fallback (see [`AudioExporter`](crate::AudioExporter)).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use vocable_core::{
    AudioBlob, AudioRecorder, CaptureError, DEFAULT_CAPTURE_GRACE_MS, RecorderEvent,
    RecorderSender, RecordingHost, SpeechEngine, SpeechError, Utterance, UtteranceEvent,
    VoiceSettings, WAV_MIME,
};

use crate::timer;

/// Records one utterance at a time from the host speech engine.
pub struct AudioCaptureBridge<E, R> {
    engine: Arc<E>,
    recorder_host: R,
    grace_period: Duration,
}

impl<E: SpeechEngine, R: RecordingHost> AudioCaptureBridge<E, R> {
    /// Create a bridge with the default grace period.
    pub const fn new(engine: Arc<E>, recorder_host: R) -> Self {
        Self {
            engine,
            recorder_host,
            grace_period: Duration::from_millis(DEFAULT_CAPTURE_GRACE_MS),
        }
    }

    /// Override the delay between the end of speech and stopping the recorder.
    #[must_use]
    pub const fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub const fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// Whether both speech synthesis and media recording are available.
    pub fn is_supported() -> bool {
        E::is_supported() && R::is_supported()
    }

    /// Speak `text` with `settings` and return what the recorder heard.
    pub async fn capture(
        &self,
        text: &str,
        settings: &VoiceSettings,
    ) -> Result<AudioBlob, CaptureError> {
        self.capture_until(text, settings, &CancellationToken::new())
            .await
    }

    /// Like [`capture`](Self::capture), abandoning the session when `cancel`
    /// fires.
    pub async fn capture_until(
        &self,
        text: &str,
        settings: &VoiceSettings,
        cancel: &CancellationToken,
    ) -> Result<AudioBlob, CaptureError> {
        if !Self::is_supported() {
            return Err(CaptureError::Unsupported);
        }

        let mut recorder = RecorderGuard::new(self.recorder_host.open()?);
        let (chunks_tx, chunks_rx) = mpsc::unbounded_channel();
        recorder.start(chunks_tx)?;

        let utterance = Utterance::from_settings(text, settings);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        self.engine
            .speak(&utterance, events_tx)
            .map_err(CaptureError::from)?;
        let speaking = SpeakingGuard {
            engine: &*self.engine,
            settled: false,
        };

        tracing::info!(
            chars = utterance.text.len(),
            grace_ms = u64::try_from(self.grace_period.as_millis()).unwrap_or(u64::MAX),
            "Audio capture started"
        );

        let outcome = self.wait_for_utterance(events_rx, cancel).await;
        speaking.settle();
        if let Err(e) = outcome {
            tracing::debug!(error = %e, "Audio capture abandoned");
            return Err(e);
        }

        tokio::select! {
            biased;

            () = cancel.cancelled() => return Err(CaptureError::Cancelled),
            () = timer::sleep(self.grace_period) => {}
        }

        recorder.stop();
        let blob = tokio::select! {
            biased;

            () = cancel.cancelled() => return Err(CaptureError::Cancelled),
            blob = collect_chunks(chunks_rx) => blob?,
        };
        recorder.release();

        tracing::info!(bytes = blob.len(), "Audio capture finished");
        Ok(blob)
    }

    /// Wait for the utterance's terminal event.
    async fn wait_for_utterance(
        &self,
        mut events: mpsc::UnboundedReceiver<UtteranceEvent>,
        cancel: &CancellationToken,
    ) -> Result<(), CaptureError> {
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    self.engine.cancel();
                    return Err(CaptureError::Cancelled);
                }

                event = events.recv() => match event {
                    Some(UtteranceEvent::End) => return Ok(()),
                    Some(UtteranceEvent::Error(code)) => return Err(CaptureError::Synthesis(code)),
                    Some(_) => {}
                    None => return Err(SpeechError::Disconnected.into()),
                },
            }
        }
    }
}

/// Drain recorder events into a single blob once the recorder stops.
async fn collect_chunks(
    mut events: mpsc::UnboundedReceiver<RecorderEvent>,
) -> Result<AudioBlob, CaptureError> {
    let mut chunks = Vec::new();
    loop {
        match events.recv().await {
            Some(RecorderEvent::Data(chunk)) => chunks.push(chunk),
            Some(RecorderEvent::Stopped) => break,
            Some(RecorderEvent::Failed(message)) => return Err(CaptureError::Recorder(message)),
            None => {
                return Err(CaptureError::Recorder(
                    "recorder closed without stopping".to_string(),
                ));
            }
        }
    }

    if chunks.is_empty() {
        tracing::warn!("Recorder stopped without producing audio");
    }
    Ok(AudioBlob::from_chunks(chunks, WAV_MIME))
}

// ── Guards ─────────────────────────────────────────────────────────

/// Cancels the host utterance if the capture is dropped before it settles.
struct SpeakingGuard<'a, E: SpeechEngine> {
    engine: &'a E,
    settled: bool,
}

impl<E: SpeechEngine> SpeakingGuard<'_, E> {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl<E: SpeechEngine> Drop for SpeakingGuard<'_, E> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("Audio capture dropped mid-utterance, cancelling speech");
            self.engine.cancel();
        }
    }
}

/// Stops and releases the recorder on every exit path.
struct RecorderGuard<Rec: AudioRecorder> {
    recorder: Rec,
    started: bool,
    stopped: bool,
    released: bool,
}

impl<Rec: AudioRecorder> RecorderGuard<Rec> {
    const fn new(recorder: Rec) -> Self {
        Self {
            recorder,
            started: false,
            stopped: false,
            released: false,
        }
    }

    fn start(&mut self, events: RecorderSender) -> Result<(), CaptureError> {
        self.recorder.start(events)?;
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.recorder.stop();
        }
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.recorder.release();
        }
    }
}

impl<Rec: AudioRecorder> Drop for RecorderGuard<Rec> {
    fn drop(&mut self) {
        if self.started {
            self.stop();
        }
        self.release();
    }
}
