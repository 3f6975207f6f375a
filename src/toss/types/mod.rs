//! Types shared by the sequencer and the Bevy systems
//!
//! Split by concern: dice, camera poses, easing, HUD panels, and the
//! configuration file.

pub mod camera;
pub mod config;
pub mod dice;
pub mod easing;
pub mod ui;

pub use camera::*;
pub use config::*;
pub use dice::*;
pub use easing::*;
pub use ui::*;
