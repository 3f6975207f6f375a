//! Systems that drive the [`RollSequencer`] resource

use bevy::prelude::*;

use super::host::BevyTossHost;
use super::input::read_toss_input;
use crate::toss::sequencer::RollSequencer;

/// Runs once the scene (and its camera) exists.
pub fn start_sequencer(mut sequencer: ResMut<RollSequencer>, mut host: BevyTossHost) {
    sequencer.start(&mut host);
}

pub fn run_sequencer_frame(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sequencer: ResMut<RollSequencer>,
    mut host: BevyTossHost,
) {
    let input = read_toss_input(&keyboard);
    sequencer.tick(time.delta_secs(), input, &mut host);
}

pub fn run_sequencer_physics(mut sequencer: ResMut<RollSequencer>, mut host: BevyTossHost) {
    sequencer.physics_tick(&mut host);
}
