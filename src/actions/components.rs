//! Actions domain: per-entity components driving the scheduler.

use bevy::prelude::*;

use crate::actions::slot::PrimaryActionSlot;
use crate::actions::snapshot::Frame;
use crate::actions::state::CharacterState;

/// Composed action slot plus the shared state its actions mutate.
#[derive(Component)]
pub struct ActionController {
    pub slot: PrimaryActionSlot,
    pub state: CharacterState,
}

impl ActionController {
    pub fn new(slot: PrimaryActionSlot) -> Self {
        Self {
            slot,
            state: CharacterState::default(),
        }
    }
}

/// Snapshots gathered for the next step by the sensor, input and world
/// bridges.
#[derive(Component, Debug, Default)]
pub struct ActionFrame(pub Frame);
