// Scare sequencer timeline and its coordination with scroll lock, theme,
// and ambient audio through the orchestrator.

mod common;

use common::{fake_channel, scenario_table, FakeChannel, FakeHandle};
use sable_core::{ChannelId, Cue, EngineEvent, Orchestrator, ScarePhase, ScareSequencer};

fn phases_in(events: &[EngineEvent]) -> Vec<ScarePhase> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::ScarePhase(p) => Some(*p),
            _ => None,
        })
        .collect()
}

fn cues_in(events: &[EngineEvent]) -> Vec<Cue> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::Cue(c) => Some(c.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn sequence_walks_every_phase_exactly_once_in_order() {
    let mut scare = ScareSequencer::new("climax");
    let mut events = Vec::new();
    assert!(scare.trigger(1_000.0, &mut events));

    // Fine-grained ticks so no phase is skipped by a late frame.
    let mut now = 1_000.0;
    while now <= 5_200.0 {
        now += 100.0;
        scare.tick(now, &mut events);
    }

    assert_eq!(
        phases_in(&events),
        vec![
            ScarePhase::Triggered,
            ScarePhase::Covering,
            ScarePhase::FullyCovered,
            ScarePhase::Revealing,
            ScarePhase::Idle,
        ],
        "each phase announced once, in timeline order"
    );
    assert_eq!(scare.phase(), ScarePhase::Idle);
    assert!(!scare.is_locked());
}

#[test]
fn scroll_lock_brackets_the_whole_sequence() {
    let mut scare = ScareSequencer::new("climax");
    let mut events = Vec::new();
    scare.trigger(0.0, &mut events);
    assert!(matches!(events.first(), Some(EngineEvent::ScrollLock(true))));
    assert!(scare.is_locked());

    scare.tick(3_999.0, &mut events);
    assert!(scare.is_locked(), "still locked during reveal");

    events.clear();
    scare.tick(4_000.0, &mut events);
    assert!(!scare.is_locked());
    assert!(
        events.contains(&EngineEvent::ScrollLock(false)),
        "unlock announced when the sequence completes"
    );
}

#[test]
fn both_impact_cues_fire_with_the_second_slightly_delayed() {
    let mut scare = ScareSequencer::new("climax");
    let mut events = Vec::new();
    scare.trigger(1_000.0, &mut events);

    let first = cues_in(&events);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].name, "pop");
    assert!((first[0].gain - 0.8).abs() < 1e-6);

    events.clear();
    scare.tick(1_049.0, &mut events);
    assert!(cues_in(&events).is_empty(), "second cue not due yet");

    scare.tick(1_050.0, &mut events);
    let second = cues_in(&events);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].name, "pop-heavy");
    assert!((second[0].gain - 1.0).abs() < 1e-6, "second impact lands harder");
}

#[test]
fn teleport_fires_only_at_full_cover() {
    let mut scare = ScareSequencer::new("climax");
    let mut events = Vec::new();
    scare.trigger(0.0, &mut events);
    scare.tick(1_499.0, &mut events);
    assert!(
        !events.iter().any(|e| matches!(e, EngineEvent::Teleport(_))),
        "no teleport while the page is still visible"
    );

    events.clear();
    scare.tick(1_500.0, &mut events);
    assert_eq!(
        events,
        vec![
            EngineEvent::ScarePhase(ScarePhase::FullyCovered),
            EngineEvent::Teleport("climax".to_string()),
        ]
    );
}

#[test]
fn retrigger_while_running_is_ignored() {
    let mut scare = ScareSequencer::new("climax");
    let mut events = Vec::new();
    scare.trigger(0.0, &mut events);
    scare.tick(600.0, &mut events);
    let len_before = events.len();

    assert!(!scare.trigger(700.0, &mut events), "re-entrancy guard");
    assert_eq!(events.len(), len_before, "ignored trigger emits nothing");
    assert_eq!(scare.phase(), ScarePhase::Covering, "timeline unaffected");

    // The original timeline still completes on schedule.
    let mut now = 700.0;
    while now <= 4_200.0 {
        now += 100.0;
        scare.tick(now, &mut events);
    }
    assert_eq!(scare.phase(), ScarePhase::Idle);
}

#[test]
fn reset_aborts_without_further_events() {
    let mut scare = ScareSequencer::new("climax");
    let mut events = Vec::new();
    scare.trigger(0.0, &mut events);
    scare.tick(600.0, &mut events);

    scare.reset();
    assert_eq!(scare.phase(), ScarePhase::Idle);
    assert!(!scare.is_locked());

    events.clear();
    scare.tick(10_000.0, &mut events);
    assert!(events.is_empty(), "aborted sequence stays silent");
}

// ---------------- orchestrator integration ----------------

struct Harness {
    engine: Orchestrator<FakeChannel>,
    ha: FakeHandle,
    hb: FakeHandle,
    events: Vec<EngineEvent>,
}

impl Harness {
    fn new() -> Self {
        let (a, ha) = fake_channel();
        let (b, hb) = fake_channel();
        Self {
            engine: Orchestrator::new(scenario_table(), a, b, "climax", 42),
            ha,
            hb,
            events: Vec::new(),
        }
    }

    /// Tick in 50ms frames up to and including `until_ms`.
    fn run_to(&mut self, from_ms: f64, until_ms: f64) {
        let mut now = from_ms;
        while now < until_ms {
            now += 50.0;
            self.engine.tick(now, &mut self.events);
        }
    }

    /// Prime, settle at the top of the page, and let hero's fade-in finish.
    fn settle_in_hero(&mut self) {
        self.engine.prime(0.0, 0.0);
        self.run_to(0.0, 3_400.0);
        assert_eq!(self.engine.current_zone(), Some("hero"));
        assert_eq!(self.engine.audio().active_track(), Some("trackA"));
        self.events.clear();
    }
}

#[test]
fn covering_phase_silences_ambient_before_the_jump() {
    let mut h = Harness::new();
    h.settle_in_hero();
    assert!((h.ha.gain.get() - 0.7).abs() < 1e-6);

    h.engine.trigger_scare(4_000.0, &mut h.events);
    // Covering begins 500ms in; the ambient fade is a fast 0.4s ramp, so by
    // full cover (1500ms in) the page is silent.
    h.run_to(4_000.0, 5_450.0);
    assert_eq!(h.ha.gain.get(), 0.0, "ambient silent under the cover");
    assert_eq!(h.engine.audio().active_channel(), None);
}

#[test]
fn teleport_lands_in_the_target_zone_with_theme_swapped_under_cover() {
    let mut h = Harness::new();
    h.settle_in_hero();

    h.engine.trigger_scare(4_000.0, &mut h.events);
    h.run_to(4_000.0, 5_550.0);

    assert!(h.events.contains(&EngineEvent::Teleport("climax".to_string())));
    assert!(h.events.contains(&EngineEvent::ThemeChanged("climax".to_string())));
    assert!(h
        .events
        .contains(&EngineEvent::ZoneChanged(Some("climax".to_string()))));
    assert_eq!(h.engine.current_zone(), Some("climax"));
    assert!((h.engine.current_ratio() - 0.75).abs() < 1e-9, "zone midpoint");
    assert_eq!(h.engine.theme(), Some("climax"));
    assert!(h.engine.is_scroll_locked(), "cover still up at teleport time");
}

#[test]
fn target_zone_audio_starts_after_the_reveal_completes() {
    let mut h = Harness::new();
    h.settle_in_hero();

    h.engine.trigger_scare(4_000.0, &mut h.events);
    h.run_to(4_000.0, 7_950.0);
    assert!(
        h.hb.loaded_tracks().is_empty(),
        "no new ambient while the sequence runs"
    );

    // Sequence ends 4s after the trigger; ambient resumes from the new zone.
    h.run_to(7_950.0, 8_050.0);
    assert!(!h.engine.is_scroll_locked());
    assert_eq!(h.hb.loaded_tracks(), vec!["trackB".to_string()]);
    assert_eq!(h.engine.audio().active_track(), Some("trackB"));

    h.run_to(8_050.0, 12_100.0);
    assert!((h.hb.gain.get() - 0.7).abs() < 1e-6, "climax fully faded in");
}

#[test]
fn scrolling_is_ignored_while_the_sequence_holds_the_lock() {
    let mut h = Harness::new();
    h.settle_in_hero();

    h.engine.trigger_scare(4_000.0, &mut h.events);
    h.run_to(4_000.0, 4_100.0);

    // A scroll to the gaze zone arrives mid-sequence and must not settle.
    h.engine.on_scroll(3_000.0, 10_000.0, 1_000.0, 4_150.0);
    h.run_to(4_100.0, 12_100.0);

    assert_eq!(h.engine.current_zone(), Some("climax"));
    assert!(
        !h.events
            .contains(&EngineEvent::ZoneChanged(Some("gaze".to_string()))),
        "locked scroll never becomes a zone change"
    );
}

#[test]
fn snapshot_tracks_the_lock_span() {
    let mut h = Harness::new();
    h.settle_in_hero();
    assert!(!h.engine.snapshot().scroll_locked);

    h.engine.trigger_scare(4_000.0, &mut h.events);
    assert!(h.engine.snapshot().scroll_locked);
    h.run_to(4_000.0, 8_050.0);

    let snap = h.engine.snapshot();
    assert!(!snap.scroll_locked);
    assert_eq!(snap.current_zone.as_deref(), Some("climax"));
    assert!(!snap.muted);
    assert!(!snap.audio_blocked);

    h.engine.trigger_scare(9_000.0, &mut h.events);
    assert!(h.engine.snapshot().scroll_locked, "sequence can run again after idle");
}

#[test]
fn track_ended_on_unused_channel_is_ignored() {
    let mut h = Harness::new();
    h.settle_in_hero();
    let calls_before = h.hb.calls.borrow().len();

    h.engine.on_track_ended(ChannelId::B, 4_000.0);
    h.run_to(4_000.0, 7_000.0);
    assert_eq!(h.hb.calls.borrow().len(), calls_before, "idle channel never restarts");
}
