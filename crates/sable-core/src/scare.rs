use smallvec::SmallVec;

use crate::constants::{
    CUE_POP2_GAIN, CUE_POP_GAIN, SCARE_COVERING_MS, SCARE_DONE_MS, SCARE_FULLY_COVERED_MS,
    SCARE_REVEALING_MS, SCARE_SECOND_CUE_MS,
};
use crate::events::EngineEvent;

/// Phase of the one-shot scare sequence. `Idle` doubles as the cooldown
/// state: a finished sequence must return here before it can run again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScarePhase {
    Idle,
    Triggered,
    Covering,
    FullyCovered,
    Revealing,
}

/// A short one-shot sample the host should fire.
#[derive(Clone, Debug, PartialEq)]
pub struct Cue {
    pub name: &'static str,
    pub gain: f32,
}

/// Interaction-triggered state machine that locks scrolling, runs a fixed
/// timeline of audio/visual cues, and teleports the scroll position while a
/// full-screen cover hides the jump.
///
/// All transitions are driven by `tick` from wall-clock offsets relative to
/// the trigger instant; nothing here blocks or sleeps. The sequencer is the
/// only writer of the scroll-lock flag.
#[derive(Debug)]
pub struct ScareSequencer {
    phase: ScarePhase,
    started_ms: f64,
    pending_cues: SmallVec<[(f64, Cue); 2]>,
    target_zone: String,
}

impl ScareSequencer {
    pub fn new(target_zone: &str) -> Self {
        Self {
            phase: ScarePhase::Idle,
            started_ms: 0.0,
            pending_cues: SmallVec::new(),
            target_zone: target_zone.to_string(),
        }
    }

    pub fn phase(&self) -> ScarePhase {
        self.phase
    }

    /// True for the whole span between trigger and the return to `Idle`.
    pub fn is_locked(&self) -> bool {
        self.phase != ScarePhase::Idle
    }

    pub fn target_zone(&self) -> &str {
        &self.target_zone
    }

    /// Start the sequence. Ignored unless the machine is `Idle`; returns
    /// whether a new sequence actually started.
    pub fn trigger(&mut self, now_ms: f64, out: &mut Vec<EngineEvent>) -> bool {
        if self.phase != ScarePhase::Idle {
            log::debug!("[scare] trigger ignored, sequence already running");
            return false;
        }
        log::info!("[scare] triggered");
        self.phase = ScarePhase::Triggered;
        self.started_ms = now_ms;
        out.push(EngineEvent::ScrollLock(true));
        out.push(EngineEvent::ScarePhase(ScarePhase::Triggered));
        out.push(EngineEvent::Cue(Cue {
            name: "pop",
            gain: CUE_POP_GAIN,
        }));
        self.pending_cues.push((
            now_ms + SCARE_SECOND_CUE_MS,
            Cue {
                name: "pop-heavy",
                gain: CUE_POP2_GAIN,
            },
        ));
        true
    }

    /// Advance the timeline. Emits each phase change exactly once, in order.
    pub fn tick(&mut self, now_ms: f64, out: &mut Vec<EngineEvent>) {
        if self.phase == ScarePhase::Idle {
            return;
        }
        while let Some(pos) = self
            .pending_cues
            .iter()
            .position(|(due, _)| now_ms >= *due)
        {
            let (_, cue) = self.pending_cues.remove(pos);
            out.push(EngineEvent::Cue(cue));
        }
        let elapsed = now_ms - self.started_ms;
        if self.phase == ScarePhase::Triggered && elapsed >= SCARE_COVERING_MS {
            self.phase = ScarePhase::Covering;
            out.push(EngineEvent::ScarePhase(ScarePhase::Covering));
        }
        if self.phase == ScarePhase::Covering && elapsed >= SCARE_FULLY_COVERED_MS {
            self.phase = ScarePhase::FullyCovered;
            out.push(EngineEvent::ScarePhase(ScarePhase::FullyCovered));
            // The cover is opaque now; this is the only safe moment to move
            // the scroll position without the user seeing the jump.
            out.push(EngineEvent::Teleport(self.target_zone.clone()));
        }
        if self.phase == ScarePhase::FullyCovered && elapsed >= SCARE_REVEALING_MS {
            self.phase = ScarePhase::Revealing;
            out.push(EngineEvent::ScarePhase(ScarePhase::Revealing));
        }
        if self.phase == ScarePhase::Revealing && elapsed >= SCARE_DONE_MS {
            log::info!("[scare] sequence complete");
            self.phase = ScarePhase::Idle;
            self.pending_cues.clear();
            out.push(EngineEvent::ScarePhase(ScarePhase::Idle));
            out.push(EngineEvent::ScrollLock(false));
        }
    }

    /// Abort immediately and drop pending cues (teardown path). Leaves the
    /// machine unlocked without emitting further events.
    pub fn reset(&mut self) {
        self.phase = ScarePhase::Idle;
        self.pending_cues.clear();
    }
}
