//! HUD panel types and components

use bevy::prelude::*;

/// The two panels the sequencer toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Shown while the player picks a die and before the throw.
    PreThrow,
    /// Shown once the camera has reached the settled die.
    PostThrow,
}

/// Component on the root node of a HUD panel
#[derive(Component)]
pub struct HudPanel(pub Panel);

/// Marker for the text inside the pre-throw panel
#[derive(Component)]
pub struct PreThrowText;

/// Marker for the text inside the post-throw panel
#[derive(Component)]
pub struct PostThrowText;
