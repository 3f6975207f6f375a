//! HUD text
//!
//! The pre-throw panel names the selected die and lists the keys. The
//! post-throw panel shows the face-up value once the close-up has finished.

use bevy::prelude::*;

use crate::toss::meshes::resting_value;
use crate::toss::sequencer::{RollSequencer, RollState};
use crate::toss::types::{DiceType, Die, PostThrowText, PreThrowText};

pub fn pre_throw_text(die: DiceType, index: usize, count: usize) -> String {
    format!(
        "{} ({}/{})\n[Left/Right] change die   [Space] throw   [Esc] quit",
        die,
        index + 1,
        count
    )
}

pub fn post_throw_text(die: DiceType, value: Option<u32>) -> String {
    match value {
        Some(value) => format!("Rolled {value} on {die}\n[Space] reset"),
        None => format!("{die} landed\n[Space] reset"),
    }
}

pub fn update_hud(
    sequencer: Res<RollSequencer>,
    dice: Query<(&Die, &Transform)>,
    mut pre_text: Query<&mut Text, (With<PreThrowText>, Without<PostThrowText>)>,
    mut post_text: Query<&mut Text, (With<PostThrowText>, Without<PreThrowText>)>,
) {
    if !sequencer.is_started() {
        return;
    }

    let pre = pre_throw_text(
        sequencer.selected_die(),
        sequencer.die_index(),
        sequencer.dice().len(),
    );
    for mut text in pre_text.iter_mut() {
        if text.0 != pre {
            text.0 = pre.clone();
        }
    }

    if sequencer.state() != RollState::ReadyToReset {
        return;
    }

    let value = sequencer
        .die()
        .and_then(|entity| dice.get(entity).ok())
        .and_then(|(die, transform)| {
            resting_value(die.die_type, &die.face_normals, transform.rotation)
        });
    let post = post_throw_text(sequencer.selected_die(), value);
    for mut text in post_text.iter_mut() {
        if text.0 != post {
            text.0 = post.clone();
        }
    }
}
