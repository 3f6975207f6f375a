//! Bevy systems
//!
//! Scene setup, the host adapter that lets the sequencer drive ECS entities,
//! input, the tween driver and the HUD.

pub mod host;
pub mod hud;
pub mod input;
pub mod sequencer;
pub mod setup;
pub mod tween;

pub use host::*;
pub use hud::*;
pub use input::*;
pub use sequencer::*;
pub use setup::*;
pub use tween::*;
