//! Hand-written mock hosts shared by the integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use vocable_core::{
    AudioRecorder, CaptureError, RecorderEvent, RecorderSender, RecordingHost, SpeechEngine,
    SpeechError, SynthesisErrorCode, Utterance, UtteranceEvent, UtteranceSender, Voice,
};

// ── Speech engine ──────────────────────────────────────────────────

/// How the scripted engine answers a submitted utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    /// Hold the utterance until the test emits events.
    Manual,
    /// Report start and end immediately.
    AutoEnd,
    /// Report start, then fail with the given code.
    AutoFail(SynthesisErrorCode),
    /// Refuse the utterance synchronously.
    Reject(String),
}

/// Calls observed by the scripted engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Speak(String),
    Pause,
    Resume,
    Cancel,
}

struct EngineState {
    script: Script,
    voices: Vec<Voice>,
    calls: Vec<EngineCall>,
    spoken: Vec<Utterance>,
    senders: Vec<UtteranceSender>,
}

/// Speech engine driven by the test. Clones share state.
#[derive(Clone)]
pub struct ScriptedEngine {
    state: Arc<Mutex<EngineState>>,
}

impl ScriptedEngine {
    pub fn new(script: Script) -> Self {
        Self {
            state: Arc::new(Mutex::new(EngineState {
                script,
                voices: vec![Voice::new("Alex", "en-US"), Voice::new("Amelie", "fr-CA")],
                calls: Vec::new(),
                spoken: Vec::new(),
                senders: Vec::new(),
            })),
        }
    }

    pub fn manual() -> Self {
        Self::new(Script::Manual)
    }

    pub fn auto_end() -> Self {
        Self::new(Script::AutoEnd)
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.lock().calls.clone()
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.lock().spoken.clone()
    }

    pub fn speak_count(&self) -> usize {
        self.lock().spoken.len()
    }

    /// Send `event` to the most recently submitted utterance.
    pub fn emit(&self, event: UtteranceEvent) {
        let state = self.lock();
        let sender = state.senders.last().expect("no utterance submitted");
        let _ = sender.send(event);
    }

    /// Send `event` to the `index`-th submitted utterance.
    pub fn emit_to(&self, index: usize, event: UtteranceEvent) {
        let state = self.lock();
        let _ = state.senders[index].send(event);
    }

    /// Drop every event channel without reporting a terminal event.
    pub fn disconnect(&self) {
        self.lock().senders.clear();
    }
}

impl SpeechEngine for ScriptedEngine {
    fn is_supported() -> bool {
        true
    }

    fn voices(&self) -> Vec<Voice> {
        self.lock().voices.clone()
    }

    fn speak(&self, utterance: &Utterance, events: UtteranceSender) -> Result<(), SpeechError> {
        let mut state = self.lock();
        state.calls.push(EngineCall::Speak(utterance.text.clone()));

        match state.script.clone() {
            Script::Reject(reason) => return Err(SpeechError::Rejected(reason)),
            Script::Manual => {}
            Script::AutoEnd => {
                let _ = events.send(UtteranceEvent::Start);
                let _ = events.send(UtteranceEvent::End);
            }
            Script::AutoFail(code) => {
                let _ = events.send(UtteranceEvent::Start);
                let _ = events.send(UtteranceEvent::Error(code));
            }
        }

        state.spoken.push(utterance.clone());
        state.senders.push(events);
        Ok(())
    }

    fn pause(&self) {
        self.lock().calls.push(EngineCall::Pause);
    }

    fn resume(&self) {
        self.lock().calls.push(EngineCall::Resume);
    }

    /// Like a browser: every pending utterance fails with `interrupted`.
    fn cancel(&self) {
        let mut state = self.lock();
        state.calls.push(EngineCall::Cancel);
        for sender in state.senders.drain(..) {
            let _ = sender.send(UtteranceEvent::Error(SynthesisErrorCode::Interrupted));
        }
    }
}

// ── Recording host ─────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecorderLog {
    pub opened: usize,
    pub started: usize,
    pub stopped: usize,
    pub released: usize,
}

#[derive(Clone, Default)]
struct RecorderScript {
    chunks: Vec<Vec<u8>>,
    fail_open: Option<String>,
    fail_on_stop: Option<String>,
    hang_on_stop: bool,
}

/// Recording host whose recorders replay canned chunks on stop.
#[derive(Clone, Default)]
pub struct MockRecordingHost {
    script: RecorderScript,
    log: Arc<Mutex<RecorderLog>>,
}

impl MockRecordingHost {
    pub fn with_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            script: RecorderScript {
                chunks,
                ..RecorderScript::default()
            },
            ..Self::default()
        }
    }

    pub fn failing_open(message: &str) -> Self {
        Self {
            script: RecorderScript {
                fail_open: Some(message.to_string()),
                ..RecorderScript::default()
            },
            ..Self::default()
        }
    }

    pub fn failing_on_stop(message: &str) -> Self {
        Self {
            script: RecorderScript {
                fail_on_stop: Some(message.to_string()),
                ..RecorderScript::default()
            },
            ..Self::default()
        }
    }

    /// Recorders that accept `stop` but never report `Stopped`.
    pub fn hanging_on_stop() -> Self {
        Self {
            script: RecorderScript {
                hang_on_stop: true,
                ..RecorderScript::default()
            },
            ..Self::default()
        }
    }

    pub fn log(&self) -> MutexGuard<'_, RecorderLog> {
        self.log.lock().unwrap()
    }
}

impl RecordingHost for MockRecordingHost {
    type Recorder = MockRecorder;

    fn is_supported() -> bool {
        true
    }

    fn open(&self) -> Result<Self::Recorder, CaptureError> {
        if let Some(message) = &self.script.fail_open {
            return Err(CaptureError::Setup(message.clone()));
        }
        self.log.lock().unwrap().opened += 1;
        Ok(MockRecorder {
            script: self.script.clone(),
            log: Arc::clone(&self.log),
            events: Mutex::new(None),
        })
    }
}

pub struct MockRecorder {
    script: RecorderScript,
    log: Arc<Mutex<RecorderLog>>,
    events: Mutex<Option<RecorderSender>>,
}

impl AudioRecorder for MockRecorder {
    fn start(&self, events: RecorderSender) -> Result<(), CaptureError> {
        self.log.lock().unwrap().started += 1;
        *self.events.lock().unwrap() = Some(events);
        Ok(())
    }

    fn stop(&self) {
        self.log.lock().unwrap().stopped += 1;
        if self.script.hang_on_stop {
            return;
        }
        let Some(events) = self.events.lock().unwrap().take() else {
            return;
        };
        for chunk in &self.script.chunks {
            let _ = events.send(RecorderEvent::Data(chunk.clone()));
        }
        let last = match &self.script.fail_on_stop {
            Some(message) => RecorderEvent::Failed(message.clone()),
            None => RecorderEvent::Stopped,
        };
        let _ = events.send(last);
    }

    fn release(&self) {
        self.log.lock().unwrap().released += 1;
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Let spawned tasks run until they block.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
