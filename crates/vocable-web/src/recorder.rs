//! `MediaRecorder` capture over a fresh `AudioContext`.
//!
//! The recorder is bound to a `MediaStreamAudioDestinationNode` of its own
//! context. Browsers play speech synthesis outside any audio graph, so on
//! most hosts this records silence; the adapter still honours the full
//! start/stop/release contract so callers can rely on cleanup.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AudioContext, Blob, BlobEvent, MediaRecorder, MediaStreamAudioDestinationNode};

use vocable_core::{AudioRecorder, CaptureError, RecorderEvent, RecorderSender, RecordingHost};

use crate::js::{has_js_host, js_message, property};

type Callback = Closure<dyn FnMut(JsValue)>;

/// Opens one audio context and recorder per capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebRecordingHost;

impl RecordingHost for WebRecordingHost {
    type Recorder = WebRecorder;

    fn is_supported() -> bool {
        if !has_js_host() {
            return false;
        }
        let Some(window) = web_sys::window() else {
            return false;
        };
        property(&window, "MediaRecorder").is_some()
            && (property(&window, "AudioContext").is_some()
                || property(&window, "webkitAudioContext").is_some())
    }

    fn open(&self) -> Result<Self::Recorder, CaptureError> {
        let setup = |e: JsValue| CaptureError::Setup(js_message(&e));

        let context = AudioContext::new().map_err(setup)?;
        let destination: MediaStreamAudioDestinationNode =
            match context.create_media_stream_destination() {
                Ok(destination) => destination,
                Err(e) => {
                    let _ = context.close();
                    return Err(setup(e));
                }
            };
        let recorder = match MediaRecorder::new_with_media_stream(&destination.stream()) {
            Ok(recorder) => recorder,
            Err(e) => {
                let _ = context.close();
                return Err(setup(e));
            }
        };

        tracing::debug!("Opened audio context and media recorder");
        Ok(WebRecorder {
            context,
            _destination: destination,
            recorder,
            events: Rc::new(RefCell::new(None)),
            callbacks: RefCell::new(Vec::new()),
            released: Cell::new(false),
        })
    }
}

/// A `MediaRecorder` plus the audio context feeding it.
pub struct WebRecorder {
    context: AudioContext,
    _destination: MediaStreamAudioDestinationNode,
    recorder: MediaRecorder,
    events: Rc<RefCell<Option<RecorderSender>>>,
    callbacks: RefCell<Vec<Callback>>,
    released: Cell<bool>,
}

impl AudioRecorder for WebRecorder {
    fn start(&self, events: RecorderSender) -> Result<(), CaptureError> {
        let blobs: Rc<RefCell<Vec<Blob>>> = Rc::default();
        *self.events.borrow_mut() = Some(events);

        let on_data = {
            let blobs = Rc::clone(&blobs);
            Callback::new(move |event: JsValue| {
                let Ok(event) = event.dyn_into::<BlobEvent>() else {
                    return;
                };
                if let Some(blob) = event.data().filter(|b| b.size() > 0.0) {
                    blobs.borrow_mut().push(blob);
                }
            })
        };

        // Blob contents are only readable asynchronously; convert them in
        // order once recording stops so `Stopped` is always last.
        let on_stop = {
            let events = Rc::clone(&self.events);
            Callback::new(move |_: JsValue| {
                let blobs = std::mem::take(&mut *blobs.borrow_mut());
                let Some(events) = events.borrow_mut().take() else {
                    return;
                };
                spawn_local(async move {
                    for blob in blobs {
                        match JsFuture::from(blob.array_buffer()).await {
                            Ok(buffer) => {
                                let bytes = Uint8Array::new(&buffer).to_vec();
                                let _ = events.send(RecorderEvent::Data(bytes));
                            }
                            Err(e) => {
                                let _ = events.send(RecorderEvent::Failed(js_message(&e)));
                                return;
                            }
                        }
                    }
                    let _ = events.send(RecorderEvent::Stopped);
                });
            })
        };

        let on_error = {
            let events = Rc::clone(&self.events);
            Callback::new(move |event: JsValue| {
                if let Some(events) = events.borrow_mut().take() {
                    let _ = events.send(RecorderEvent::Failed(js_message(&event)));
                }
            })
        };

        self.recorder
            .set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
        self.recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));
        self.recorder
            .set_onerror(Some(on_error.as_ref().unchecked_ref()));
        self.callbacks
            .borrow_mut()
            .extend([on_data, on_stop, on_error]);

        self.recorder
            .start()
            .map_err(|e| CaptureError::Recorder(js_message(&e)))
    }

    fn stop(&self) {
        if let Err(e) = self.recorder.stop() {
            let message = js_message(&e);
            tracing::warn!(%message, "MediaRecorder refused to stop");
            if let Some(events) = self.events.borrow_mut().take() {
                let _ = events.send(RecorderEvent::Failed(message));
            }
        }
    }

    fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        if let Err(e) = self.context.close() {
            tracing::warn!(message = %js_message(&e), "Failed to close audio context");
        }
        tracing::debug!("Released audio context");
    }
}

impl Drop for WebRecorder {
    fn drop(&mut self) {
        // Detach handlers before their closures are freed.
        self.recorder.set_ondataavailable(None);
        self.recorder.set_onstop(None);
        self.recorder.set_onerror(None);
        self.release();
    }
}
