use std::cell::Cell;
use std::rc::Rc;

use sable_core::{ChannelPlayback, PlaybackRejected};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::constants::{CUE_POP_HEAVY_SRC, CUE_POP_SRC};

/// Async playback outcomes the frame loop polls once per frame and feeds
/// back into the engine.
#[derive(Clone)]
pub struct ChannelFlags {
    pub ended: Rc<Cell<bool>>,
    pub rejected: Rc<Cell<bool>>,
}

/// One ambient playback channel: an `HtmlAudioElement` routed through a
/// `GainNode` so gain changes are click-free and independent of the
/// element's own volume.
pub struct WebChannel {
    element: web::HtmlAudioElement,
    gain: web::GainNode,
    flags: ChannelFlags,
    reject_cb: Closure<dyn FnMut(JsValue)>,
}

impl WebChannel {
    pub fn new(audio_ctx: &web::AudioContext, label: &str) -> Result<Self, ()> {
        let element = web::HtmlAudioElement::new().map_err(|e| {
            log::error!("{label} audio element error: {e:?}");
        })?;
        element.set_loop(false);
        element.set_preload("auto");

        let source = audio_ctx.create_media_element_source(&element).map_err(|e| {
            log::error!("{label} media source error: {e:?}");
        })?;
        let gain = web::GainNode::new(audio_ctx).map_err(|e| {
            log::error!("{label} GainNode error: {e:?}");
        })?;
        gain.gain().set_value(0.0);
        let _ = source.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&audio_ctx.destination());

        let flags = ChannelFlags {
            ended: Rc::new(Cell::new(false)),
            rejected: Rc::new(Cell::new(false)),
        };

        let ended = flags.ended.clone();
        let on_ended = Closure::wrap(Box::new(move || {
            ended.set(true);
        }) as Box<dyn FnMut()>);
        let _ = element
            .add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref());
        on_ended.forget();

        let rejected = flags.rejected.clone();
        let reject_cb = Closure::wrap(Box::new(move |_e: JsValue| {
            rejected.set(true);
        }) as Box<dyn FnMut(JsValue)>);

        Ok(Self {
            element,
            gain,
            flags,
            reject_cb,
        })
    }

    pub fn flags(&self) -> ChannelFlags {
        self.flags.clone()
    }
}

impl ChannelPlayback for WebChannel {
    fn load(&mut self, track: &str) {
        self.element.set_src(track);
    }

    fn play(&mut self) -> Result<(), PlaybackRejected> {
        match self.element.play() {
            Ok(promise) => {
                // Autoplay denial arrives asynchronously; surface it through
                // the rejected flag instead of an unhandled promise.
                let _ = promise.catch(&self.reject_cb);
                Ok(())
            }
            Err(_) => Err(PlaybackRejected),
        }
    }

    fn pause(&mut self) {
        let _ = self.element.pause();
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain.gain().set_value(gain);
    }

    fn set_position(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }
}

/// Fire-and-forget one-shot cue. Failures are swallowed; the scare's visual
/// phases never depend on audio succeeding.
pub fn play_cue(name: &str, gain: f32) {
    let src = match name {
        "pop" => CUE_POP_SRC,
        "pop-heavy" => CUE_POP_HEAVY_SRC,
        _ => {
            log::warn!("[cue] unknown cue `{name}`");
            return;
        }
    };
    if let Ok(el) = web::HtmlAudioElement::new_with_src(src) {
        el.set_volume(gain as f64);
        if let Ok(promise) = el.play() {
            let swallow = Closure::wrap(Box::new(move |_e: JsValue| {}) as Box<dyn FnMut(JsValue)>);
            let _ = promise.catch(&swallow);
            swallow.forget();
        }
    }
}
