use std::cell::RefCell;
use std::rc::Rc;

use sable_core::{EngineEvent, Orchestrator};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::WebChannel;
use crate::constants::{MUTE_TOGGLE_ID, SCARE_TRIGGER_ID};
use crate::dom;

pub type SharedEngine = Rc<RefCell<Orchestrator<WebChannel>>>;
pub type SharedEvents = Rc<RefCell<Vec<EngineEvent>>>;

/// Passive scroll listener; must never block the scroll thread, so it only
/// feeds the sampler and returns.
pub fn wire_scroll(engine: SharedEngine) {
    let Some(window) = web::window() else { return };
    let win = window.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let Some(doc) = win.document() else { return };
        if let Some((offset, doc_height, viewport)) = dom::scroll_metrics(&win, &doc) {
            engine
                .borrow_mut()
                .on_scroll(offset, doc_height, viewport, js_sys::Date::now());
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// The balloon click that starts the scare sequence.
pub fn wire_scare_trigger(document: &web::Document, engine: SharedEngine, pending: SharedEvents) {
    dom::add_click_listener(document, SCARE_TRIGGER_ID, move || {
        let now = js_sys::Date::now();
        let mut out = pending.borrow_mut();
        engine.borrow_mut().trigger_scare(now, &mut out);
    });
}

/// Mute toggle; doubles as the user gesture that unblocks autoplay.
pub fn wire_mute_toggle(
    document: &web::Document,
    engine: SharedEngine,
    pending: SharedEvents,
    audio_ctx: web::AudioContext,
) {
    dom::add_click_listener(document, MUTE_TOGGLE_ID, move || {
        let now = js_sys::Date::now();
        let _ = audio_ctx.resume();
        let mut out = pending.borrow_mut();
        let mut eng = engine.borrow_mut();
        let muted = eng.toggle_mute(now, &mut out);
        if !muted {
            eng.user_gesture(now);
        }
    });
}
