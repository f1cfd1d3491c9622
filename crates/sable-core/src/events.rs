use crate::scare::{Cue, ScarePhase};

/// Typed notifications posted by the engine into the caller's buffer.
///
/// Presentational collaborators (background renderer, overlay, scroll host)
/// subscribe by draining this buffer each frame; the engine never touches
/// the DOM or any UI framework lifecycle itself.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// A settled scroll ratio resolved to a new zone. `None` means the ratio
    /// fell in a gap between configured ranges (implicit silence).
    ZoneChanged(Option<String>),
    /// Theme/accent id for the background renderer. Last value wins.
    ThemeChanged(String),
    ScarePhase(ScarePhase),
    /// The host must suspend or restore scroll input.
    ScrollLock(bool),
    /// The host must jump scroll position to the named zone's section,
    /// without animation, while the cover conceals the move.
    Teleport(String),
    /// One-shot sample the host should fire immediately.
    Cue(Cue),
    MuteChanged(bool),
}
