use sable_core::{Zone, ZoneTable, ZoneTableError};

// Static page configuration: section zones, tracks, and cue assets.

pub const ENGINE_SEED: u64 = 42;

// The blood curtain covers the halloween -> climax jump
pub const SCARE_TARGET_ZONE: &str = "climax";

pub const TRACK_HERO: &str = "/assets/committed.mp3";
pub const TRACK_CLIMAX: &str = "/assets/rosemary.mp3";

pub const CUE_POP_SRC: &str = "/assets/balloon_pop.mp3";
pub const CUE_POP_HEAVY_SRC: &str = "/assets/pennywise_laugh.mp3";

// DOM ids the front-end expects in index.html
pub const OVERLAY_ID: &str = "blood-overlay";
pub const SCARE_TRIGGER_ID: &str = "scare-balloon";
pub const MUTE_TOGGLE_ID: &str = "audio-toggle";

/// Canonical zone layout. Only hero and climax carry tracks; every other
/// zone is a deliberate silence zone that keeps its own theme.
pub fn zone_table() -> Result<ZoneTable, ZoneTableError> {
    ZoneTable::new(vec![
        Zone::new("hero", 0.0, 0.12, Some(TRACK_HERO), 3.0, 2.0),
        Zone::new("gaze", 0.12, 0.24, None, 2.0, 2.0),
        Zone::new("canvas", 0.24, 0.36, None, 2.0, 2.0),
        Zone::new("rain", 0.36, 0.48, None, 2.0, 2.0),
        Zone::new("party", 0.48, 0.60, None, 2.0, 2.0),
        Zone::new("halloween", 0.60, 0.72, None, 2.0, 1.5),
        Zone::new("climax", 0.72, 0.88, Some(TRACK_CLIMAX), 4.0, 2.0),
        Zone::new("sunset", 0.88, 1.0, None, 3.0, 3.0),
    ])
}
