//! Roll Sequencer
//!
//! The game logic proper: a small state machine that picks a die, tumbles it
//! while idle, throws it, waits for it to settle, flies the camera in, and
//! resets. It never touches the ECS directly; everything engine-side goes
//! through the collaborator traits in [`host`], so the whole flow can be
//! driven from tests with a fake host.

pub mod host;
mod machine;
mod oscillation;
mod settle;
mod state;

pub use host::*;
pub use machine::*;
pub use oscillation::*;
pub use settle::*;
pub use state::*;
