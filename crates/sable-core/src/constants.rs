// Engine timing and gain tuning constants shared by all frontends.

// Scroll settle detection
pub const DEBOUNCE_NORMAL_MS: f64 = 300.0;
pub const DEBOUNCE_FAST_MS: f64 = 800.0;
// Recent velocity above this (ratio-units per ms) counts as a fling
pub const FAST_SCROLL_RATIO_PER_MS: f64 = 0.0003;
// Delay before the initial zone detection pass after startup
pub const INITIAL_DETECT_MS: f64 = 200.0;

// Ambient playback
pub const TARGET_GAIN: f32 = 0.7;
pub const DEFAULT_FADE_OUT_SEC: f32 = 2.0;
// Randomized breathing gap before a finished track restarts
pub const LOOP_GAP_MIN_MS: f64 = 500.0;
pub const LOOP_GAP_MAX_MS: f64 = 2000.0;
pub const LOOP_REFADE_SEC: f32 = 1.0;

// Master gain tweens
pub const DUCK_TWEEN_SEC: f32 = 0.35;
pub const MUTE_TWEEN_SEC: f32 = 0.5;

// Scare timeline, offsets from trigger time in ms (monotonic, non-overlapping)
pub const SCARE_SECOND_CUE_MS: f64 = 50.0;
pub const SCARE_COVERING_MS: f64 = 500.0;
pub const SCARE_FULLY_COVERED_MS: f64 = 1500.0;
pub const SCARE_REVEALING_MS: f64 = 2500.0;
pub const SCARE_DONE_MS: f64 = 4000.0;

// Scare cue gains; the second impact lands harder than the first
pub const CUE_POP_GAIN: f32 = 0.8;
pub const CUE_POP2_GAIN: f32 = 1.0;
// Ambient fade used when the cover starts hiding the page
pub const SCARE_AMBIENT_FADE_SEC: f32 = 0.4;
