pub mod audio;
pub mod constants;
pub mod engine;
pub mod events;
pub mod scare;
pub mod scroll;
pub mod state;
pub mod theme;
pub mod tween;
pub mod zone;

pub use audio::*;
pub use constants::*;
pub use engine::*;
pub use events::*;
pub use scare::*;
pub use scroll::*;
pub use state::*;
pub use theme::*;
pub use tween::*;
pub use zone::*;
