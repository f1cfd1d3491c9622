/// Read-only view of the engine for UI collaborators (mute toggle,
/// progress indicator). Mutated only by the orchestrator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineSnapshot {
    pub current_zone: Option<String>,
    pub scroll_locked: bool,
    pub global_gain: f32,
    pub muted: bool,
    /// Playback was rejected by the host (autoplay policy) and is waiting
    /// for an explicit user gesture.
    pub audio_blocked: bool,
}
