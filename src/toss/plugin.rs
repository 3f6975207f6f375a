//! `TossPlugin` wires the sequencer, tweens and HUD into an `App`.
//!
//! Physics is not added here; the binary adds `RapierPhysicsPlugin` next to
//! `DefaultPlugins`.

use bevy::prelude::*;

use crate::toss::sequencer::RollSequencer;
use crate::toss::systems::{
    advance_tweens, run_sequencer_frame, run_sequencer_physics, setup_scene, start_sequencer,
    update_hud, TweenTracker,
};
use crate::toss::types::TossConfig;

/// The config is expected to have passed [`TossConfig::validate`].
#[derive(Default)]
pub struct TossPlugin {
    pub config: TossConfig,
}

impl TossPlugin {
    pub fn new(config: TossConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TossPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(RollSequencer::<Entity>::new(&self.config))
            .init_resource::<TweenTracker>()
            .add_systems(Startup, (setup_scene, start_sequencer).chain())
            .add_systems(
                Update,
                (advance_tweens, run_sequencer_frame, update_hud).chain(),
            )
            .add_systems(FixedUpdate, run_sequencer_physics);
    }
}
