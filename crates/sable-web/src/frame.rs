use std::cell::RefCell;
use std::rc::Rc;

use sable_core::{ChannelId, EngineEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::{self, ChannelFlags};
use crate::dom;
use crate::events::{SharedEngine, SharedEvents};
use crate::overlay;

/// Per-frame driver: polls async playback outcomes, advances the engine,
/// and applies the emitted events to the document.
pub struct FrameContext {
    pub engine: SharedEngine,
    pub pending: SharedEvents,
    pub channel_flags: [ChannelFlags; 2],
    pub document: web::Document,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = js_sys::Date::now();

        for (i, flags) in self.channel_flags.iter().enumerate() {
            let id = if i == 0 { ChannelId::A } else { ChannelId::B };
            if flags.ended.replace(false) {
                self.engine.borrow_mut().on_track_ended(id, now);
            }
            if flags.rejected.replace(false) {
                self.engine.borrow_mut().mark_play_rejected(id);
            }
        }

        let mut events = std::mem::take(&mut *self.pending.borrow_mut());
        self.engine.borrow_mut().tick(now, &mut events);
        for ev in events {
            self.apply(ev);
        }
    }

    fn apply(&self, ev: EngineEvent) {
        match ev {
            EngineEvent::ThemeChanged(zone_id) => dom::set_theme(&self.document, &zone_id),
            EngineEvent::ZoneChanged(zone_id) => {
                log::info!("[web] zone -> {}", zone_id.as_deref().unwrap_or("-"));
            }
            EngineEvent::ScarePhase(phase) => overlay::set_scare_phase(&self.document, phase),
            EngineEvent::ScrollLock(locked) => dom::set_scroll_locked(&self.document, locked),
            EngineEvent::Teleport(zone_id) => {
                let ratio = self
                    .engine
                    .borrow()
                    .table()
                    .by_id(&zone_id)
                    .map(|z| z.mid_ratio());
                if let (Some(window), Some(ratio)) = (web::window(), ratio) {
                    dom::jump_to_ratio(&window, &self.document, ratio);
                }
            }
            EngineEvent::Cue(cue) => audio::play_cue(cue.name, cue.gain),
            EngineEvent::MuteChanged(muted) => overlay::set_mute_indicator(&self.document, muted),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
