//! Speech controller: a playback state machine over the host speech engine.
//!
//! ```text
//!   Idle → Playing ⇄ Paused
//!    ▲        │        │
//!    └────────┴────────┘   (end, error or stop)
//! ```
//!
//! The controller owns at most one active utterance. Host callbacks arrive
//! as [`UtteranceEvent`]s on a per-utterance channel; the future returned by
//! [`SpeechController::speak`] resolves exactly once, on the first terminal
//! event or on interruption, whichever comes first.
//!
//! # Shared engine
//!
//! Clones of a controller share one state. Separate controllers built over
//! the same host engine do **not** share state, but still interrupt each
//! other: the host engine is process-wide, so `cancel` from one of them
//! terminates utterances submitted by the other.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot, watch};

use vocable_core::{
    PlaybackSnapshot, PlaybackState, SpeechEngine, SpeechError, SynthesisErrorCode, TtsRequest,
    Utterance, UtteranceEvent, Voice,
};

// ── Controller state ───────────────────────────────────────────────

/// The utterance currently owned by the controller.
struct ActiveUtterance {
    id: u64,

    /// Fired when the utterance is cancelled by `stop` or a newer `speak`.
    interrupt: oneshot::Sender<()>,
}

#[derive(Default)]
struct Inner {
    is_playing: bool,
    is_paused: bool,
    active: Option<ActiveUtterance>,
    next_id: u64,
}

impl Inner {
    fn is_current(&self, id: u64) -> bool {
        self.active.as_ref().is_some_and(|active| active.id == id)
    }

    const fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot::new(self.is_playing, self.is_paused)
    }

    /// Force the idle flags and hand back the active utterance, if any.
    const fn reset(&mut self) -> Option<ActiveUtterance> {
        self.is_playing = false;
        self.is_paused = false;
        self.active.take()
    }
}

struct Shared {
    inner: Mutex<Inner>,
    state_tx: watch::Sender<PlaybackSnapshot>,
}

/// Returns the controller to `Idle` on every exit from `speak`, including
/// when its future is dropped mid-utterance.
struct SettleGuard<'a, E: SpeechEngine> {
    controller: &'a SpeechController<E>,
    id: u64,
    settled: bool,
}

impl<E: SpeechEngine> SettleGuard<'_, E> {
    fn settle(mut self) {
        self.settled = true;
        self.controller.finish(self.id);
    }
}

impl<E: SpeechEngine> Drop for SettleGuard<'_, E> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller.abandon(self.id);
        }
    }
}

// ── Speech controller ──────────────────────────────────────────────

/// Playback state machine over a host [`SpeechEngine`].
pub struct SpeechController<E> {
    engine: Arc<E>,
    shared: Arc<Shared>,
}

impl<E> Clone for SpeechController<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E: SpeechEngine> SpeechController<E> {
    /// Create a controller that owns `engine`.
    pub fn new(engine: E) -> Self {
        Self::with_shared_engine(Arc::new(engine))
    }

    /// Create a controller over an engine handle shared with other users
    /// (typically an [`AudioCaptureBridge`](crate::AudioCaptureBridge)).
    pub fn with_shared_engine(engine: Arc<E>) -> Self {
        let (state_tx, _) = watch::channel(PlaybackSnapshot::idle());
        Self {
            engine,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                state_tx,
            }),
        }
    }

    /// Whether the host exposes speech synthesis. No controller is required.
    pub fn is_supported() -> bool {
        E::is_supported()
    }

    /// The host engine handle.
    pub const fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Voices the host currently offers.
    pub fn voices(&self) -> Vec<Voice> {
        self.engine.voices()
    }

    /// Look up a host voice by name.
    pub fn find_voice(&self, name: &str) -> Option<Voice> {
        self.engine.voices().into_iter().find(|v| v.name == name)
    }

    /// Current playback flags.
    pub fn state(&self) -> PlaybackSnapshot {
        self.lock().snapshot()
    }

    /// Current playback state.
    pub fn playback_state(&self) -> PlaybackState {
        self.state().state()
    }

    /// Watch playback state changes (for UI layers).
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.shared.state_tx.subscribe()
    }

    // ── Transport ──────────────────────────────────────────────────

    /// Speak `request` and wait until the utterance finishes.
    ///
    /// Any active utterance is cancelled first and its own `speak` future
    /// resolves with [`SynthesisErrorCode::Interrupted`]. Blank text resolves
    /// immediately without touching the host.
    pub async fn speak(&self, request: TtsRequest) -> Result<(), SpeechError> {
        if request.is_blank() {
            tracing::debug!("Ignoring blank speech request");
            return Ok(());
        }

        if !E::is_supported() {
            return Err(SpeechError::UnsupportedPlatform);
        }

        let utterance = Utterance::from_request(&request);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let (interrupt_tx, mut interrupt_rx) = oneshot::channel();

        // Replace the active utterance atomically so two concurrent calls
        // can never both believe they own the engine.
        let (id, previous) = self.update(|inner| {
            let previous = inner.reset();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.active = Some(ActiveUtterance {
                id,
                interrupt: interrupt_tx,
            });
            (id, previous)
        });

        if let Some(previous) = previous {
            tracing::debug!(id = previous.id, "Interrupting active utterance");
            self.engine.cancel();
            let _ = previous.interrupt.send(());
        }

        tracing::debug!(
            id,
            chars = utterance.text.len(),
            rate = utterance.rate,
            pitch = utterance.pitch,
            volume = utterance.volume,
            voice = utterance.voice.as_ref().map(|v| v.name.as_str()),
            "Submitting utterance"
        );

        let guard = SettleGuard {
            controller: self,
            id,
            settled: false,
        };

        if let Err(e) = self.engine.speak(&utterance, events_tx) {
            guard.settle();
            return Err(e);
        }

        let outcome = loop {
            tokio::select! {
                biased;

                _ = &mut interrupt_rx => {
                    break Err(SpeechError::Synthesis(SynthesisErrorCode::Interrupted));
                }

                event = events_rx.recv() => match event {
                    Some(UtteranceEvent::Start) => self.on_started(id),
                    Some(UtteranceEvent::Pause) => self.on_paused(id, true),
                    Some(UtteranceEvent::Resume) => self.on_paused(id, false),
                    Some(UtteranceEvent::Boundary { char_index }) => {
                        tracing::trace!(id, char_index, "Utterance boundary");
                    }
                    Some(UtteranceEvent::End) => break Ok(()),
                    Some(UtteranceEvent::Error(code)) => break Err(SpeechError::Synthesis(code)),
                    None => break Err(SpeechError::Disconnected),
                },
            }
        };

        guard.settle();
        tracing::debug!(id, ok = outcome.is_ok(), "Utterance settled");
        outcome
    }

    /// Pause playback. No-op unless playing and not already paused.
    pub fn pause(&self) {
        let paused = self.update(|inner| {
            if inner.is_playing && !inner.is_paused {
                inner.is_paused = true;
                true
            } else {
                false
            }
        });

        if paused {
            self.engine.pause();
            tracing::debug!("Playback paused");
        }
    }

    /// Resume playback. No-op unless paused.
    pub fn resume(&self) {
        let resumed = self.update(|inner| {
            if inner.is_paused {
                inner.is_paused = false;
                true
            } else {
                false
            }
        });

        if resumed {
            self.engine.resume();
            tracing::debug!("Playback resumed");
        }
    }

    /// Cancel everything on the host engine and return to `Idle`.
    ///
    /// Idempotent; a stop racing a natural completion is harmless.
    pub fn stop(&self) {
        self.engine.cancel();
        if let Some(previous) = self.update(Inner::reset) {
            let _ = previous.interrupt.send(());
            tracing::debug!(id = previous.id, "Playback stopped");
        }
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn on_started(&self, id: u64) {
        self.update(|inner| {
            if inner.is_current(id) {
                inner.is_playing = true;
                inner.is_paused = false;
            }
        });
    }

    fn on_paused(&self, id: u64, paused: bool) {
        self.update(|inner| {
            if inner.is_current(id) && inner.is_playing {
                inner.is_paused = paused;
            }
        });
    }

    /// Terminal transition for `id`; ignored once the utterance was replaced
    /// or stopped.
    fn finish(&self, id: u64) {
        self.update(|inner| {
            if inner.is_current(id) {
                inner.reset();
            }
        });
    }

    /// A `speak` future was dropped before its utterance settled: cancel the
    /// host utterance if it is still ours and return to `Idle`.
    fn abandon(&self, id: u64) {
        let abandoned = self.update(|inner| {
            if inner.is_current(id) {
                inner.reset();
                true
            } else {
                false
            }
        });

        if abandoned {
            self.engine.cancel();
            tracing::debug!(id, "Speak future dropped, utterance cancelled");
        }
    }

    /// Mutate the state and publish the resulting snapshot.
    fn update<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.lock();
        let result = f(&mut inner);
        let snapshot = inner.snapshot();
        self.shared.state_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                tracing::debug!(
                    old = ?current.state(),
                    new = ?snapshot.state(),
                    "Playback state transition"
                );
                *current = snapshot;
                true
            }
        });
        result
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
