use rand::prelude::*;
use thiserror::Error;

use crate::constants::{
    DEFAULT_FADE_OUT_SEC, DUCK_TWEEN_SEC, LOOP_GAP_MAX_MS, LOOP_GAP_MIN_MS, LOOP_REFADE_SEC,
    MUTE_TWEEN_SEC, TARGET_GAIN,
};
use crate::tween::GainRamp;
use crate::zone::Zone;

/// The host denied a play request (autoplay policy). Recovered locally:
/// gain stays at 0 and playback is retried on the next user gesture only.
#[derive(Debug, Error, PartialEq)]
#[error("playback rejected by host")]
pub struct PlaybackRejected;

/// Playback primitive the host provides for each channel.
///
/// Track end is asynchronous on real hosts and is reported back through
/// `CrossfadeEngine::on_track_ended` rather than polled here.
pub trait ChannelPlayback {
    fn load(&mut self, track: &str);
    fn play(&mut self) -> Result<(), PlaybackRejected>;
    fn pause(&mut self);
    fn set_gain(&mut self, gain: f32);
    fn set_position(&mut self, seconds: f64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelId {
    A,
    B,
}

impl ChannelId {
    fn index(self) -> usize {
        match self {
            ChannelId::A => 0,
            ChannelId::B => 1,
        }
    }

    fn from_index(i: usize) -> Self {
        if i == 0 {
            ChannelId::A
        } else {
            ChannelId::B
        }
    }
}

struct Channel<P> {
    playback: P,
    track: Option<String>,
    /// Gain before the master multiplier, as of the last tick.
    gain: f32,
    ramp: Option<GainRamp>,
    /// Stop and clear the channel once its ramp reaches silence.
    release_on_silence: bool,
    /// Fade-out duration carried over from the zone that assigned the track.
    fade_out_sec: f32,
    /// Wall-clock instant a loop restart becomes due after the track ended.
    restart_due_ms: Option<f64>,
    /// A restart came due while muted; run it on the next user gesture.
    restart_deferred: bool,
    last_applied: f32,
}

impl<P: ChannelPlayback> Channel<P> {
    fn new(playback: P) -> Self {
        Self {
            playback,
            track: None,
            gain: 0.0,
            ramp: None,
            release_on_silence: false,
            fade_out_sec: DEFAULT_FADE_OUT_SEC,
            restart_due_ms: None,
            restart_deferred: false,
            last_applied: -1.0,
        }
    }

    fn clear(&mut self) {
        self.playback.pause();
        self.track = None;
        self.ramp = None;
        self.release_on_silence = false;
        self.restart_due_ms = None;
        self.restart_deferred = false;
    }

    fn apply(&mut self, master: f32) {
        let applied = (self.gain * master).clamp(0.0, 1.0);
        if (applied - self.last_applied).abs() > 1e-4 {
            self.playback.set_gain(applied);
            self.last_applied = applied;
        }
    }
}

/// Owns the only two playback channels in the system and keeps ambient
/// audio gap-free across zone transitions.
///
/// Crossfades run both gain ramps from the same instant so the outgoing and
/// incoming tracks overlap; a zone change arriving mid-crossfade cancels the
/// in-flight ramps and reassigns channels immediately. Finished tracks do
/// not loop seamlessly: a randomized breathing gap precedes each restart.
pub struct CrossfadeEngine<P> {
    channels: [Channel<P>; 2],
    active: Option<usize>,
    /// Most recent active index; keeps channel assignment alternating even
    /// after everything faded to silence.
    last_active: usize,
    /// Master multiplier applied on top of per-channel gain.
    master: f32,
    master_ramp: Option<GainRamp>,
    /// Ducking target restored when unmuting.
    gain_multiplier: f32,
    muted: bool,
    blocked: bool,
    rng: StdRng,
}

impl<P: ChannelPlayback> CrossfadeEngine<P> {
    pub fn new(a: P, b: P, seed: u64) -> Self {
        Self {
            channels: [Channel::new(a), Channel::new(b)],
            active: None,
            last_active: 1,
            master: 1.0,
            master_ramp: None,
            gain_multiplier: 1.0,
            muted: false,
            blocked: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// React to a settled zone change. `zone` is `None` in range gaps, which
    /// behaves like a zone without a track: fade to silence, start nothing.
    pub fn on_zone_changed(&mut self, zone: Option<&Zone>, now_ms: f64) {
        let new_track = zone.and_then(|z| z.track.as_deref());
        let active_track = self
            .active
            .and_then(|i| self.channels[i].track.as_deref());
        if new_track == active_track && new_track.is_some() {
            return; // already playing this track
        }

        let (zone, track) = match zone {
            Some(z) => match z.track.as_deref() {
                Some(t) => (z, t),
                None => {
                    self.fade_active_out(now_ms, None);
                    return;
                }
            },
            None => {
                self.fade_active_out(now_ms, None);
                return;
            }
        };

        let incoming = self.pick_incoming(track);
        if Some(incoming) == self.active {
            return;
        }
        if let Some(outgoing) = self.active {
            let from = self.channels[outgoing].gain;
            let dur = self.channels[outgoing].fade_out_sec;
            self.channels[outgoing].ramp = Some(GainRamp::new(from, 0.0, now_ms, dur));
            self.channels[outgoing].release_on_silence = true;
            self.channels[outgoing].restart_due_ms = None;
            self.channels[outgoing].restart_deferred = false;
        }

        let reuse = self.channels[incoming].track.as_deref() == Some(track);
        let ch = &mut self.channels[incoming];
        if !reuse {
            ch.playback.load(track);
            ch.playback.set_position(0.0);
            ch.track = Some(track.to_string());
            ch.gain = 0.0;
        }
        ch.fade_out_sec = zone.fade_out_sec;
        ch.release_on_silence = false;
        ch.restart_due_ms = None;
        ch.restart_deferred = false;
        ch.ramp = Some(GainRamp::new(ch.gain, TARGET_GAIN, now_ms, zone.fade_in_sec));
        match ch.playback.play() {
            Ok(()) => {}
            Err(PlaybackRejected) => {
                // Gain stays at 0 until an explicit user gesture; no retry loop.
                log::warn!("[audio] play rejected for `{track}`, waiting for gesture");
                ch.ramp = None;
                ch.gain = 0.0;
                self.blocked = true;
            }
        }
        self.active = Some(incoming);
        self.last_active = incoming;
        log::info!(
            "[audio] crossfade to `{}` on channel {:?} (in {:.1}s)",
            track,
            ChannelId::from_index(incoming),
            zone.fade_in_sec
        );
    }

    /// Fade every sounding channel to silence and release it. Used for
    /// silence zones and when the scare cover suspends ambient audio.
    pub fn fade_to_silence(&mut self, fade_sec: Option<f32>, now_ms: f64) {
        self.fade_active_out(now_ms, fade_sec);
        // A channel already fading out keeps its ramp; nothing new starts.
        self.active = None;
    }

    fn fade_active_out(&mut self, now_ms: f64, fade_sec: Option<f32>) {
        if let Some(i) = self.active.take() {
            let ch = &mut self.channels[i];
            if ch.track.is_some() {
                let dur = fade_sec.unwrap_or(ch.fade_out_sec);
                ch.ramp = Some(GainRamp::new(ch.gain, 0.0, now_ms, dur));
                ch.release_on_silence = true;
                ch.restart_due_ms = None;
                ch.restart_deferred = false;
                log::info!("[audio] fading channel {:?} to silence", ChannelId::from_index(i));
            }
        }
    }

    fn pick_incoming(&self, track: &str) -> usize {
        // Prefer a channel still holding this track (interrupted fade-out),
        // otherwise alternate away from the channel that played last.
        if let Some(i) = self
            .channels
            .iter()
            .position(|c| c.track.as_deref() == Some(track))
        {
            return i;
        }
        1 - self.active.unwrap_or(self.last_active)
    }

    /// The host reports that a channel's track played to its natural end.
    pub fn on_track_ended(&mut self, id: ChannelId, now_ms: f64) {
        let i = id.index();
        if self.channels[i].track.is_none() || self.channels[i].release_on_silence {
            return;
        }
        let gap = self.rng.gen_range(LOOP_GAP_MIN_MS..=LOOP_GAP_MAX_MS);
        log::debug!("[audio] track ended on {id:?}, restarting in {gap:.0}ms");
        self.channels[i].restart_due_ms = Some(now_ms + gap);
    }

    /// Ducking: scale ambient gain under a foreground source, via a short
    /// tween so there is no audible click.
    pub fn set_global_gain(&mut self, gain: f32, now_ms: f64) {
        self.gain_multiplier = gain.clamp(0.0, 1.0);
        if !self.muted {
            self.master_ramp = Some(GainRamp::new(
                self.master,
                self.gain_multiplier,
                now_ms,
                DUCK_TWEEN_SEC,
            ));
        }
    }

    pub fn set_muted(&mut self, muted: bool, now_ms: f64) {
        if muted == self.muted {
            return;
        }
        self.muted = muted;
        let target = if muted { 0.0 } else { self.gain_multiplier };
        self.master_ramp = Some(GainRamp::new(self.master, target, now_ms, MUTE_TWEEN_SEC));
        if !muted {
            self.user_gesture(now_ms);
        }
    }

    /// An explicit user gesture arrived (unmute click). Retry playback that
    /// the host rejected and run any restart deferred while muted.
    pub fn user_gesture(&mut self, now_ms: f64) {
        for i in 0..2 {
            let deferred = self.channels[i].restart_deferred;
            let has_track = self.channels[i].track.is_some();
            if !has_track {
                continue;
            }
            if deferred {
                self.restart_channel(i, now_ms);
            } else if self.blocked && !self.channels[i].release_on_silence {
                if self.channels[i].playback.play().is_ok() {
                    self.blocked = false;
                    let ch = &mut self.channels[i];
                    ch.ramp = Some(GainRamp::new(ch.gain, TARGET_GAIN, now_ms, LOOP_REFADE_SEC));
                }
            }
        }
    }

    /// The host resolved a play request asynchronously and it was rejected.
    pub fn mark_play_rejected(&mut self, id: ChannelId) {
        log::warn!("[audio] deferred play rejection on {id:?}");
        let ch = &mut self.channels[id.index()];
        ch.ramp = None;
        ch.gain = 0.0;
        self.blocked = true;
    }

    fn restart_channel(&mut self, i: usize, now_ms: f64) {
        let ch = &mut self.channels[i];
        ch.restart_due_ms = None;
        ch.restart_deferred = false;
        ch.playback.set_position(0.0);
        ch.gain = 0.0;
        ch.ramp = Some(GainRamp::new(0.0, TARGET_GAIN, now_ms, LOOP_REFADE_SEC));
        if ch.playback.play().is_err() {
            // Same recovery as a rejected zone start: silent until a gesture.
            log::warn!("[audio] loop restart rejected on channel {i}");
            ch.ramp = None;
            self.blocked = true;
        }
    }

    /// Evaluate all active ramps and due restarts once per animation frame.
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(ramp) = self.master_ramp {
            self.master = ramp.value_at(now_ms);
            if ramp.finished(now_ms) {
                self.master_ramp = None;
            }
        }
        for i in 0..2 {
            if let Some(due) = self.channels[i].restart_due_ms {
                if now_ms >= due {
                    if self.muted {
                        self.channels[i].restart_due_ms = None;
                        self.channels[i].restart_deferred = true;
                    } else {
                        self.restart_channel(i, now_ms);
                    }
                }
            }
            let ch = &mut self.channels[i];
            if let Some(ramp) = ch.ramp {
                ch.gain = ramp.value_at(now_ms);
                if ramp.finished(now_ms) {
                    ch.ramp = None;
                    if ch.release_on_silence && ch.gain <= f32::EPSILON {
                        ch.clear();
                        ch.gain = 0.0;
                    }
                }
            }
            self.channels[i].apply(self.master);
        }
    }

    // ---------------- read accessors ----------------

    pub fn active_channel(&self) -> Option<ChannelId> {
        self.active.map(ChannelId::from_index)
    }

    pub fn active_track(&self) -> Option<&str> {
        self.active.and_then(|i| self.channels[i].track.as_deref())
    }

    pub fn channel_track(&self, id: ChannelId) -> Option<&str> {
        self.channels[id.index()].track.as_deref()
    }

    /// Per-channel gain before the master multiplier, as of the last tick.
    pub fn channel_gain(&self, id: ChannelId) -> f32 {
        self.channels[id.index()].gain
    }

    pub fn master_gain(&self) -> f32 {
        self.master
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }
}
