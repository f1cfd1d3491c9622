#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use sable_core::Orchestrator;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sable-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {e:?}");
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let channel_a = audio::WebChannel::new(&audio_ctx, "channel A")
        .map_err(|_| anyhow::anyhow!("channel A init failed"))?;
    let channel_b = audio::WebChannel::new(&audio_ctx, "channel B")
        .map_err(|_| anyhow::anyhow!("channel B init failed"))?;
    let flags = [channel_a.flags(), channel_b.flags()];

    let table = constants::zone_table().map_err(|e| anyhow::anyhow!("zone table: {e}"))?;
    let mut orchestrator = Orchestrator::new(
        table,
        channel_a,
        channel_b,
        constants::SCARE_TARGET_ZONE,
        constants::ENGINE_SEED,
    );
    orchestrator.prime(dom::scroll_ratio(&window, &document), js_sys::Date::now());

    let engine = Rc::new(RefCell::new(orchestrator));
    let pending = Rc::new(RefCell::new(Vec::new()));

    events::wire_scroll(engine.clone());
    events::wire_scare_trigger(&document, engine.clone(), pending.clone());
    events::wire_mute_toggle(&document, engine.clone(), pending.clone(), audio_ctx);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        pending,
        channel_flags: flags,
        document,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
