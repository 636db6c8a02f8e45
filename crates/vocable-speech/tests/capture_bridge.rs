//! Integration tests for `AudioCaptureBridge` and `AudioExporter`.
//!
//! Time is paused so the grace period elapses instantly but measurably.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::{EngineCall, MockRecordingHost, Script, ScriptedEngine, settle};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use vocable_core::{
    AudioBlob, CaptureError, ExportError, FallbackError, NoopRecordingHost, NoopSpeechEngine,
    RemoteSynthesizer, SynthesisErrorCode, TtsRequest, VoiceSettings, WAV_MIME,
};
use vocable_speech::{AudioCaptureBridge, AudioExporter};

fn bridge(
    engine: &ScriptedEngine,
    host: &MockRecordingHost,
) -> AudioCaptureBridge<ScriptedEngine, MockRecordingHost> {
    AudioCaptureBridge::new(Arc::new(engine.clone()), host.clone())
}

// ── Capture ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn capture_collects_chunks_after_the_grace_period() {
    let engine = ScriptedEngine::auto_end();
    let host = MockRecordingHost::with_chunks(vec![b"RIFF".to_vec(), b"WAVE".to_vec()]);
    let bridge = bridge(&engine, &host);

    let started = Instant::now();
    let blob = bridge
        .capture("hello world", &VoiceSettings::default())
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_millis(500));
    assert_eq!(blob.bytes(), b"RIFFWAVE");
    assert_eq!(blob.mime(), WAV_MIME);

    let log = host.log();
    assert_eq!((log.opened, log.started, log.stopped, log.released), (1, 1, 1, 1));
}

#[tokio::test(start_paused = true)]
async fn grace_period_is_configurable() {
    let engine = ScriptedEngine::auto_end();
    let host = MockRecordingHost::with_chunks(vec![vec![1, 2, 3]]);
    let bridge = bridge(&engine, &host).with_grace_period(Duration::from_secs(2));
    assert_eq!(bridge.grace_period(), Duration::from_secs(2));

    let started = Instant::now();
    bridge.capture("hi", &VoiceSettings::default()).await.unwrap();

    assert!(started.elapsed() >= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn silent_capture_yields_an_empty_blob() {
    let engine = ScriptedEngine::auto_end();
    let host = MockRecordingHost::default();

    let blob = bridge(&engine, &host)
        .capture("hello", &VoiceSettings::default())
        .await
        .unwrap();

    assert!(blob.is_empty());
    assert_eq!(blob.mime(), WAV_MIME);
}

#[tokio::test(start_paused = true)]
async fn synthesis_error_stops_and_releases_immediately() {
    let engine = ScriptedEngine::new(Script::AutoFail(SynthesisErrorCode::AudioBusy));
    let host = MockRecordingHost::with_chunks(vec![b"RIFF".to_vec()]);

    let started = Instant::now();
    let err = bridge(&engine, &host)
        .capture("hello", &VoiceSettings::default())
        .await
        .unwrap_err();

    assert_eq!(err, CaptureError::Synthesis(SynthesisErrorCode::AudioBusy));
    assert!(started.elapsed() < Duration::from_millis(500));
    let log = host.log();
    assert_eq!((log.stopped, log.released), (1, 1));
}

#[tokio::test]
async fn setup_failure_never_speaks() {
    let engine = ScriptedEngine::auto_end();
    let host = MockRecordingHost::failing_open("no audio context");

    let err = bridge(&engine, &host)
        .capture("hello", &VoiceSettings::default())
        .await
        .unwrap_err();

    assert_eq!(err, CaptureError::Setup("no audio context".to_string()));
    assert_eq!(engine.speak_count(), 0);
}

#[tokio::test]
async fn rejected_utterance_releases_the_recorder() {
    let engine = ScriptedEngine::new(Script::Reject("voice missing".to_string()));
    let host = MockRecordingHost::default();

    let err = bridge(&engine, &host)
        .capture("hello", &VoiceSettings::default())
        .await
        .unwrap_err();

    assert_eq!(err, CaptureError::Setup("voice missing".to_string()));
    let log = host.log();
    assert_eq!((log.started, log.stopped, log.released), (1, 1, 1));
}

#[tokio::test(start_paused = true)]
async fn recorder_failure_while_finalizing_is_reported() {
    let engine = ScriptedEngine::auto_end();
    let host = MockRecordingHost::failing_on_stop("encoder crashed");

    let err = bridge(&engine, &host)
        .capture("hello", &VoiceSettings::default())
        .await
        .unwrap_err();

    assert_eq!(err, CaptureError::Recorder("encoder crashed".to_string()));
    assert_eq!(host.log().released, 1);
}

#[tokio::test]
async fn cancellation_cancels_the_utterance_and_releases() {
    let engine = ScriptedEngine::manual();
    let host = MockRecordingHost::default();
    let bridge = Arc::new(bridge(&engine, &host));
    let cancel = CancellationToken::new();

    let handle = {
        let bridge = Arc::clone(&bridge);
        let cancel = cancel.clone();
        tokio::spawn(async move {
            bridge
                .capture_until("a very long passage", &VoiceSettings::default(), &cancel)
                .await
        })
    };
    settle().await;
    assert_eq!(engine.speak_count(), 1);

    cancel.cancel();

    assert_eq!(handle.await.unwrap(), Err(CaptureError::Cancelled));
    assert!(engine.calls().contains(&EngineCall::Cancel));
    let log = host.log();
    assert_eq!((log.stopped, log.released), (1, 1));
}

#[tokio::test(start_paused = true)]
async fn cancellation_while_finalizing_releases_the_recorder() {
    let engine = ScriptedEngine::auto_end();
    let host = MockRecordingHost::hanging_on_stop();
    let bridge = Arc::new(bridge(&engine, &host));
    let cancel = CancellationToken::new();

    let handle = {
        let bridge = Arc::clone(&bridge);
        let cancel = cancel.clone();
        tokio::spawn(async move {
            bridge
                .capture_until("hello", &VoiceSettings::default(), &cancel)
                .await
        })
    };
    tokio::time::sleep(Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(host.log().stopped, 1);
    assert!(!handle.is_finished());

    cancel.cancel();

    assert_eq!(handle.await.unwrap(), Err(CaptureError::Cancelled));
    assert_eq!(host.log().released, 1);
}

#[tokio::test]
async fn dropped_capture_cancels_speech_and_releases() {
    let engine = ScriptedEngine::manual();
    let host = MockRecordingHost::default();
    let bridge = Arc::new(bridge(&engine, &host));

    let handle = {
        let bridge = Arc::clone(&bridge);
        tokio::spawn(async move { bridge.capture("hello", &VoiceSettings::default()).await })
    };
    settle().await;
    assert_eq!(engine.speak_count(), 1);

    handle.abort();
    assert!(handle.await.unwrap_err().is_cancelled());

    assert_eq!(engine.calls().last(), Some(&EngineCall::Cancel));
    let log = host.log();
    assert_eq!((log.stopped, log.released), (1, 1));
}

#[tokio::test(start_paused = true)]
async fn finished_capture_does_not_cancel_speech() {
    let engine = ScriptedEngine::auto_end();
    let host = MockRecordingHost::with_chunks(vec![b"RIFF".to_vec()]);

    bridge(&engine, &host)
        .capture("hello", &VoiceSettings::default())
        .await
        .unwrap();

    assert!(!engine.calls().contains(&EngineCall::Cancel));
}

#[tokio::test]
async fn unsupported_host_fails_before_opening() {
    let bridge: AudioCaptureBridge<NoopSpeechEngine, MockRecordingHost> =
        AudioCaptureBridge::new(Arc::new(NoopSpeechEngine), MockRecordingHost::default());

    let err = bridge
        .capture("hello", &VoiceSettings::default())
        .await
        .unwrap_err();

    assert_eq!(err, CaptureError::Unsupported);
    assert!(!AudioCaptureBridge::<NoopSpeechEngine, MockRecordingHost>::is_supported());
    assert!(AudioCaptureBridge::<ScriptedEngine, MockRecordingHost>::is_supported());
}

// ── Export ─────────────────────────────────────────────────────────

#[derive(Default)]
struct MockSynthesizer {
    calls: AtomicUsize,
}

#[async_trait]
impl RemoteSynthesizer for MockSynthesizer {
    async fn synthesize(&self, request: &TtsRequest) -> Result<AudioBlob, FallbackError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AudioBlob::new(request.text.as_bytes().to_vec(), "audio/mpeg"))
    }
}

#[tokio::test(start_paused = true)]
async fn exporter_prefers_host_capture() {
    let engine = ScriptedEngine::auto_end();
    let host = MockRecordingHost::with_chunks(vec![b"RIFF".to_vec()]);
    let exporter = AudioExporter::new(bridge(&engine, &host), Some(MockSynthesizer::default()));

    let blob = exporter.export(&TtsRequest::new("hello")).await.unwrap();

    assert_eq!(blob.bytes(), b"RIFF");
    assert_eq!(engine.speak_count(), 1);
}

#[tokio::test]
async fn exporter_falls_back_when_host_cannot_capture() {
    let capture = AudioCaptureBridge::new(Arc::new(NoopSpeechEngine), NoopRecordingHost);
    let exporter = AudioExporter::new(capture, Some(MockSynthesizer::default()));
    assert!(exporter.has_fallback());

    let blob = exporter.export(&TtsRequest::new("hello")).await.unwrap();

    assert_eq!(blob.bytes(), b"hello");
    assert_eq!(blob.mime(), "audio/mpeg");
}

#[tokio::test]
async fn exporter_without_any_path_is_unsupported() {
    let capture = AudioCaptureBridge::new(Arc::new(NoopSpeechEngine), NoopRecordingHost);
    let exporter: AudioExporter<_, _, MockSynthesizer> = AudioExporter::new(capture, None);

    let err = exporter.export(&TtsRequest::new("hello")).await.unwrap_err();

    assert_eq!(err, ExportError::Unsupported);
}
