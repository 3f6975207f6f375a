//! Sequencer state and per-frame input

/// Where the sequencer is in the throw cycle.
///
/// Transitions only ever go forward around the loop:
/// `Idle -> Throwing -> Thrown -> Settling -> ReadyToReset -> Resetting -> Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RollState {
    /// Die tumbles in place; the player can pick a die, throw, or quit.
    #[default]
    Idle,
    /// Throw requested; the impulse goes out on the next physics step.
    Throwing,
    /// Die is in flight or rolling; waiting for it to come to rest.
    Thrown,
    /// Die has settled and the camera is flying in.
    Settling,
    /// Camera is at the die and the result is shown.
    ReadyToReset,
    /// Camera and die are animating back to their start poses.
    Resetting,
}

impl RollState {
    /// The die is not thrown, so the idle tumble drives its spin.
    pub fn is_tumbling(self) -> bool {
        matches!(self, RollState::Idle | RollState::Resetting)
    }
}

/// Direction for cycling through the die list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DieStep {
    Next,
    Previous,
}

/// Buttons pressed this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TossInput {
    pub throw: bool,
    pub next: bool,
    pub previous: bool,
    pub quit: bool,
}

impl TossInput {
    pub fn throw() -> Self {
        Self {
            throw: true,
            ..Self::default()
        }
    }

    pub fn next() -> Self {
        Self {
            next: true,
            ..Self::default()
        }
    }

    pub fn previous() -> Self {
        Self {
            previous: true,
            ..Self::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}
