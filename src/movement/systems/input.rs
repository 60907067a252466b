//! Movement domain: keyboard sampling into the action frame.

use bevy::prelude::*;

use crate::actions::snapshot::InputSnapshot;
use crate::actions::ActionFrame;
use crate::movement::{InputLatch, Player};

const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const SPECIAL_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::KeyJ];

/// Runs every render frame so presses shorter than a fixed step are kept.
pub(crate) fn latch_input(keyboard: Res<ButtonInput<KeyCode>>, mut latch: ResMut<InputLatch>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (crouch and look up)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    latch.axis = Vec2::new(x, y);
    latch.jump.update(
        keyboard.any_just_pressed(JUMP_KEYS),
        keyboard.any_pressed(JUMP_KEYS),
        keyboard.any_just_released(JUMP_KEYS),
    );
    latch.special.update(
        keyboard.any_just_pressed(SPECIAL_KEYS),
        keyboard.any_pressed(SPECIAL_KEYS),
        keyboard.any_just_released(SPECIAL_KEYS),
    );
}

pub(crate) fn sample_input(
    mut latch: ResMut<InputLatch>,
    mut query: Query<&mut ActionFrame, With<Player>>,
) {
    let input = InputSnapshot {
        axis: latch.axis,
        jump: latch.jump.take(),
        special: latch.special.take(),
    };
    for mut frame in &mut query {
        frame.0.input = input;
    }
}
