use sable_core::{
    ChannelPlayback, EngineEvent, Orchestrator, PlaybackRejected, Zone, ZoneTable,
};

/// Playback stub that logs what a real host would do. The engine never
/// notices the difference; that is the point of the trait seam.
struct LogChannel {
    label: &'static str,
    last_logged_gain: f32,
}

impl LogChannel {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            last_logged_gain: -1.0,
        }
    }
}

impl ChannelPlayback for LogChannel {
    fn load(&mut self, track: &str) {
        log::info!("[{}] load {track}", self.label);
    }

    fn play(&mut self) -> Result<(), PlaybackRejected> {
        log::info!("[{}] play", self.label);
        Ok(())
    }

    fn pause(&mut self) {
        log::info!("[{}] pause", self.label);
    }

    fn set_gain(&mut self, gain: f32) {
        // Gain moves every frame during a fade; log only coarse steps.
        if (gain - self.last_logged_gain).abs() >= 0.1 || gain == 0.0 {
            log::info!("[{}] gain {gain:.2}", self.label);
            self.last_logged_gain = gain;
        }
    }

    fn set_position(&mut self, seconds: f64) {
        log::info!("[{}] seek {seconds:.1}s", self.label);
    }
}

fn demo_table() -> anyhow::Result<ZoneTable> {
    Ok(ZoneTable::new(vec![
        Zone::new("hero", 0.0, 0.2, Some("committed.mp3"), 3.0, 2.0),
        Zone::new("gaze", 0.2, 0.5, None, 2.0, 2.0),
        Zone::new("climax", 0.5, 1.0, Some("rosemary.mp3"), 4.0, 2.0),
    ])?)
}

/// Run `frames` animation frames of 16 ms each, logging emitted events.
fn step(engine: &mut Orchestrator<LogChannel>, now_ms: &mut f64, frames: u32) {
    let mut events: Vec<EngineEvent> = Vec::new();
    for _ in 0..frames {
        *now_ms += 16.0;
        events.clear();
        engine.tick(*now_ms, &mut events);
        for ev in &events {
            log::info!("[event] {ev:?}");
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut engine = Orchestrator::new(
        demo_table()?,
        LogChannel::new("A"),
        LogChannel::new("B"),
        "climax",
        42,
    );

    // Simulated session clock; one frame every 16 ms.
    let mut now_ms = 0.0_f64;
    let mut events: Vec<EngineEvent> = Vec::new();

    engine.prime(0.0, now_ms);
    step(&mut engine, &mut now_ms, 30);

    // Slow scroll down to the middle of the page, then settle.
    log::info!("--- scrolling to the gaze section ---");
    for i in 0..20 {
        engine.on_scroll(150.0 * i as f64, 10_000.0, 1_000.0, now_ms);
        step(&mut engine, &mut now_ms, 2);
    }
    step(&mut engine, &mut now_ms, 40);

    // Fling to the bottom; the longer debounce should hold zone changes
    // back until the scrolling stops.
    log::info!("--- flinging to the climax section ---");
    for i in 0..10 {
        engine.on_scroll(3_000.0 + 600.0 * i as f64, 10_000.0, 1_000.0, now_ms);
        step(&mut engine, &mut now_ms, 1);
    }
    step(&mut engine, &mut now_ms, 80);

    // Trigger the scare and let the whole sequence run out.
    log::info!("--- balloon click ---");
    events.clear();
    engine.trigger_scare(now_ms, &mut events);
    for ev in &events {
        log::info!("[event] {ev:?}");
    }
    step(&mut engine, &mut now_ms, 280);

    let snap = engine.snapshot();
    log::info!(
        "session done: zone={:?} locked={} gain={:.2}",
        snap.current_zone,
        snap.scroll_locked,
        snap.global_gain
    );
    Ok(())
}
