//! Web Speech API engine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

use vocable_core::{
    SpeechEngine, SpeechError, SynthesisErrorCode, Utterance, UtteranceEvent, UtteranceSender,
    Voice,
};

use crate::js::{has_js_host, js_message, property};

type Callback = Closure<dyn FnMut(JsValue)>;

/// A submitted utterance and the callbacks the browser may still invoke.
struct PendingUtterance {
    _utterance: SpeechSynthesisUtterance,
    _callbacks: Vec<Callback>,
    done: Rc<Cell<bool>>,
}

/// Speech engine over `window.speechSynthesis`.
///
/// `speechSynthesis` is a per-page singleton: every `WebSpeechEngine` drives
/// the same queue.
pub struct WebSpeechEngine {
    synth: SpeechSynthesis,
    pending: RefCell<Vec<PendingUtterance>>,
}

impl WebSpeechEngine {
    /// Bind to the page's speech synthesis.
    pub fn new() -> Result<Self, SpeechError> {
        if !Self::is_supported() {
            return Err(SpeechError::UnsupportedPlatform);
        }
        let synth = web_sys::window()
            .ok_or(SpeechError::UnsupportedPlatform)?
            .speech_synthesis()
            .map_err(|_| SpeechError::UnsupportedPlatform)?;

        Ok(Self {
            synth,
            pending: RefCell::new(Vec::new()),
        })
    }

    fn host_voice(&self, name: &str) -> Option<SpeechSynthesisVoice> {
        self.synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .find(|v| v.name() == name)
    }

    /// Drop callbacks of utterances the browser has finished with.
    fn prune(&self) {
        self.pending.borrow_mut().retain(|p| !p.done.get());
    }
}

impl SpeechEngine for WebSpeechEngine {
    fn is_supported() -> bool {
        if !has_js_host() {
            return false;
        }
        let Some(window) = web_sys::window() else {
            return false;
        };
        property(&window, "speechSynthesis").is_some()
            && property(&window, "SpeechSynthesisUtterance").is_some()
    }

    fn voices(&self) -> Vec<Voice> {
        self.synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .map(|v| Voice {
                name: v.name(),
                lang: v.lang(),
                uri: v.voice_uri(),
                local_service: v.local_service(),
                default: v.default(),
            })
            .collect()
    }

    fn speak(&self, utterance: &Utterance, events: UtteranceSender) -> Result<(), SpeechError> {
        self.prune();

        let host = SpeechSynthesisUtterance::new_with_text(&utterance.text)
            .map_err(|e| SpeechError::Rejected(js_message(&e)))?;
        host.set_rate(utterance.rate);
        host.set_pitch(utterance.pitch);
        host.set_volume(utterance.volume);

        if let Some(voice) = &utterance.voice {
            match self.host_voice(&voice.name) {
                Some(host_voice) => host.set_voice(Some(&host_voice)),
                None => tracing::warn!(voice = %voice.name, "Voice no longer offered by browser"),
            }
        }
        if let Some(lang) = utterance_lang(utterance) {
            host.set_lang(lang);
        }

        let done = Rc::new(Cell::new(false));
        let notify = |event: UtteranceEvent| {
            let events = events.clone();
            Callback::new(move |_: JsValue| {
                let _ = events.send(event.clone());
            })
        };

        let on_start = notify(UtteranceEvent::Start);
        let on_pause = notify(UtteranceEvent::Pause);
        let on_resume = notify(UtteranceEvent::Resume);
        let on_boundary = {
            let events = events.clone();
            Callback::new(move |event: JsValue| {
                let char_index = char_index(property(&event, "charIndex").and_then(|v| v.as_f64()));
                let _ = events.send(UtteranceEvent::Boundary { char_index });
            })
        };
        let on_end = {
            let events = events.clone();
            let done = Rc::clone(&done);
            Callback::new(move |_: JsValue| {
                done.set(true);
                let _ = events.send(UtteranceEvent::End);
            })
        };
        let on_error = {
            let done = Rc::clone(&done);
            Callback::new(move |event: JsValue| {
                done.set(true);
                let code = property(&event, "error")
                    .and_then(|v| v.as_string())
                    .unwrap_or_default();
                let _ = events.send(UtteranceEvent::Error(SynthesisErrorCode::from_host(&code)));
            })
        };

        host.set_onstart(Some(on_start.as_ref().unchecked_ref()));
        host.set_onpause(Some(on_pause.as_ref().unchecked_ref()));
        host.set_onresume(Some(on_resume.as_ref().unchecked_ref()));
        host.set_onboundary(Some(on_boundary.as_ref().unchecked_ref()));
        host.set_onend(Some(on_end.as_ref().unchecked_ref()));
        host.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        self.synth.speak(&host);

        self.pending.borrow_mut().push(PendingUtterance {
            _utterance: host,
            _callbacks: vec![on_start, on_pause, on_resume, on_boundary, on_end, on_error],
            done,
        });
        Ok(())
    }

    fn pause(&self) {
        self.synth.pause();
    }

    fn resume(&self) {
        self.synth.resume();
    }

    fn cancel(&self) {
        // Callbacks stay registered: the browser reports `interrupted` on the
        // cancelled utterances after this returns.
        self.synth.cancel();
    }
}

/// Language hint for the host: explicit, else the chosen voice's.
fn utterance_lang(utterance: &Utterance) -> Option<&str> {
    utterance
        .lang
        .as_deref()
        .or_else(|| utterance.voice.as_ref().map(|v| v.lang.as_str()))
        .filter(|lang| !lang.is_empty())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn char_index(raw: Option<f64>) -> u32 {
    raw.filter(|v| v.is_finite())
        .map_or(0, |v| v.clamp(0.0, f64::from(u32::MAX)) as u32)
}
