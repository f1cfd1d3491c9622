// Shared test doubles for the engine suites.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sable_core::{ChannelPlayback, PlaybackRejected, Zone, ZoneTable};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Load(String),
    Play,
    Pause,
    Seek(f64),
}

/// Recording playback stub. Handles stay valid after the channel moves into
/// the engine, so tests can inspect calls and the last applied gain.
pub struct FakeChannel {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub gain: Rc<Cell<f32>>,
    pub reject_plays: Rc<Cell<bool>>,
}

#[derive(Clone)]
pub struct FakeHandle {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub gain: Rc<Cell<f32>>,
    pub reject_plays: Rc<Cell<bool>>,
}

impl FakeHandle {
    pub fn play_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| **c == Call::Play)
            .count()
    }

    pub fn loaded_tracks(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Load(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn paused(&self) -> bool {
        matches!(self.calls.borrow().last(), Some(Call::Pause))
    }
}

pub fn fake_channel() -> (FakeChannel, FakeHandle) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let gain = Rc::new(Cell::new(0.0));
    let reject_plays = Rc::new(Cell::new(false));
    (
        FakeChannel {
            calls: calls.clone(),
            gain: gain.clone(),
            reject_plays: reject_plays.clone(),
        },
        FakeHandle {
            calls,
            gain,
            reject_plays,
        },
    )
}

impl ChannelPlayback for FakeChannel {
    fn load(&mut self, track: &str) {
        self.calls.borrow_mut().push(Call::Load(track.to_string()));
    }

    fn play(&mut self) -> Result<(), PlaybackRejected> {
        self.calls.borrow_mut().push(Call::Play);
        if self.reject_plays.get() {
            Err(PlaybackRejected)
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push(Call::Pause);
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain.set(gain);
    }

    fn set_position(&mut self, seconds: f64) {
        self.calls.borrow_mut().push(Call::Seek(seconds));
    }
}

/// The canonical three-zone scenario: hero and climax carry tracks, gaze is
/// a silence zone between them.
pub fn scenario_table() -> ZoneTable {
    ZoneTable::new(vec![
        Zone::new("hero", 0.0, 0.2, Some("trackA"), 3.0, 2.0),
        Zone::new("gaze", 0.2, 0.5, None, 2.0, 2.0),
        Zone::new("climax", 0.5, 1.0, Some("trackB"), 4.0, 2.0),
    ])
    .expect("valid scenario table")
}
