use crate::audio::{ChannelId, ChannelPlayback, CrossfadeEngine};
use crate::constants::SCARE_AMBIENT_FADE_SEC;
use crate::events::EngineEvent;
use crate::scare::{ScarePhase, ScareSequencer};
use crate::scroll::ScrollSampler;
use crate::state::EngineSnapshot;
use crate::theme::ThemeBroadcaster;
use crate::zone::{Zone, ZoneTable};

/// Ties the scroll path (sampler → resolver → crossfade + theme) together
/// with the scare sequencer, which shares the scroll-lock flag and the same
/// theme broadcaster.
///
/// All entry points take the caller's clock (`now_ms`) and post typed
/// events into the caller's buffer; the host drains that buffer once per
/// frame and applies it to the DOM, overlay, and scroll machinery. Zone
/// changes are serialized because everything funnels through `tick`.
pub struct Orchestrator<P: ChannelPlayback> {
    sampler: ScrollSampler,
    table: ZoneTable,
    audio: CrossfadeEngine<P>,
    scare: ScareSequencer,
    theme: ThemeBroadcaster,
    current_zone: Option<String>,
    current_ratio: f64,
    scare_buf: Vec<EngineEvent>,
}

impl<P: ChannelPlayback> Orchestrator<P> {
    pub fn new(table: ZoneTable, channel_a: P, channel_b: P, scare_target: &str, seed: u64) -> Self {
        Self {
            sampler: ScrollSampler::new(),
            table,
            audio: CrossfadeEngine::new(channel_a, channel_b, seed),
            scare: ScareSequencer::new(scare_target),
            theme: ThemeBroadcaster::new(),
            current_zone: None,
            current_ratio: 0.0,
            scare_buf: Vec::new(),
        }
    }

    /// Schedule the initial zone detection pass shortly after startup, from
    /// the host's current (possibly restored) scroll ratio.
    pub fn prime(&mut self, initial_ratio: f64, now_ms: f64) {
        self.sampler.prime(initial_ratio, now_ms);
    }

    /// Raw scroll notification from the host. Cheap and synchronous; the
    /// settled ratio surfaces later through `tick`. Ignored while the scare
    /// sequence holds the scroll lock.
    pub fn on_scroll(&mut self, offset_px: f64, doc_height_px: f64, viewport_px: f64, now_ms: f64) {
        if self.scare.is_locked() {
            return;
        }
        self.sampler.on_scroll(offset_px, doc_height_px, viewport_px, now_ms);
    }

    /// Start the scare sequence. No-op while a sequence is running.
    pub fn trigger_scare(&mut self, now_ms: f64, out: &mut Vec<EngineEvent>) -> bool {
        self.scare.trigger(now_ms, out)
    }

    /// Advance the whole engine once per animation frame.
    pub fn tick(&mut self, now_ms: f64, out: &mut Vec<EngineEvent>) {
        self.scare.tick(now_ms, &mut self.scare_buf);
        for ev in std::mem::take(&mut self.scare_buf) {
            match &ev {
                EngineEvent::ScarePhase(ScarePhase::Covering) => {
                    // Cover is rising; stop the zone-driven ambient track.
                    self.audio
                        .fade_to_silence(Some(SCARE_AMBIENT_FADE_SEC), now_ms);
                }
                EngineEvent::Teleport(zone_id) => {
                    if let Some(zone) = self.table.by_id(zone_id) {
                        self.current_ratio = zone.mid_ratio();
                        let id = zone.id.clone();
                        self.current_zone = Some(id.clone());
                        // Swap the theme while the cover is opaque so the
                        // reveal shows no mismatch.
                        self.theme.set(&id, out);
                        out.push(EngineEvent::ZoneChanged(Some(id)));
                    } else {
                        log::warn!("[engine] teleport target `{zone_id}` not in zone table");
                    }
                }
                EngineEvent::ScarePhase(ScarePhase::Idle) => {
                    // Sequence done: drop any settle pending from before the
                    // lock and resume zone-driven audio from the new spot.
                    self.sampler.reset();
                    let zone = self.table.resolve(self.current_ratio);
                    self.audio.on_zone_changed(zone, now_ms);
                }
                _ => {}
            }
            out.push(ev);
        }

        if !self.scare.is_locked() {
            if let Some(ratio) = self.sampler.tick(now_ms) {
                self.current_ratio = ratio;
                let zone = self.table.resolve(ratio).cloned();
                let zone_id = zone.as_ref().map(|z| z.id.clone());
                if zone_id != self.current_zone {
                    self.apply_zone(zone.as_ref(), now_ms, out);
                }
            }
        }

        self.audio.tick(now_ms);
    }

    fn apply_zone(&mut self, zone: Option<&Zone>, now_ms: f64, out: &mut Vec<EngineEvent>) {
        let zone_id = zone.map(|z| z.id.clone());
        log::info!(
            "[engine] zone {} -> {} at ratio {:.3}",
            self.current_zone.as_deref().unwrap_or("-"),
            zone_id.as_deref().unwrap_or("-"),
            self.current_ratio
        );
        self.current_zone = zone_id.clone();
        if let Some(id) = &zone_id {
            self.theme.set(id, out);
        }
        out.push(EngineEvent::ZoneChanged(zone_id));
        self.audio.on_zone_changed(zone, now_ms);
    }

    pub fn set_muted(&mut self, muted: bool, now_ms: f64, out: &mut Vec<EngineEvent>) {
        if muted == self.audio.is_muted() {
            return;
        }
        self.audio.set_muted(muted, now_ms);
        out.push(EngineEvent::MuteChanged(muted));
    }

    pub fn toggle_mute(&mut self, now_ms: f64, out: &mut Vec<EngineEvent>) -> bool {
        let next = !self.audio.is_muted();
        self.set_muted(next, now_ms, out);
        next
    }

    /// Ducking hook for foreground audio (e.g. an unmuted video card).
    pub fn set_global_gain(&mut self, gain: f32, now_ms: f64) {
        self.audio.set_global_gain(gain, now_ms);
    }

    pub fn on_track_ended(&mut self, channel: ChannelId, now_ms: f64) {
        self.audio.on_track_ended(channel, now_ms);
    }

    /// The host resolved a play request asynchronously as rejected.
    pub fn mark_play_rejected(&mut self, channel: ChannelId) {
        self.audio.mark_play_rejected(channel);
    }

    /// An explicit user gesture arrived; retry playback blocked by the
    /// host's autoplay policy.
    pub fn user_gesture(&mut self, now_ms: f64) {
        self.audio.user_gesture(now_ms);
    }

    /// Cancel pending debounce and scare timers (teardown path). No events
    /// fire after this.
    pub fn reset(&mut self) {
        self.sampler.reset();
        self.scare.reset();
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            current_zone: self.current_zone.clone(),
            scroll_locked: self.scare.is_locked(),
            global_gain: self.audio.master_gain(),
            muted: self.audio.is_muted(),
            audio_blocked: self.audio.is_blocked(),
        }
    }

    // ---------------- read accessors ----------------

    pub fn current_zone(&self) -> Option<&str> {
        self.current_zone.as_deref()
    }

    pub fn current_ratio(&self) -> f64 {
        self.current_ratio
    }

    pub fn scare_phase(&self) -> ScarePhase {
        self.scare.phase()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scare.is_locked()
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.current()
    }

    pub fn table(&self) -> &ZoneTable {
        &self.table
    }

    pub fn audio(&self) -> &CrossfadeEngine<P> {
        &self.audio
    }
}
