//! Keyboard bindings
//!
//! Space throws or resets, Right/D and Left/A cycle dice, Escape quits.

use bevy::prelude::*;

use crate::toss::sequencer::TossInput;

pub fn read_toss_input(keyboard: &ButtonInput<KeyCode>) -> TossInput {
    TossInput {
        throw: keyboard.just_pressed(KeyCode::Space),
        next: keyboard.any_just_pressed([KeyCode::ArrowRight, KeyCode::KeyD]),
        previous: keyboard.any_just_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]),
        quit: keyboard.just_pressed(KeyCode::Escape),
    }
}
