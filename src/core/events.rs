//! Core domain: events for loadout selection.

use bevy::ecs::message::Message;

/// Fired when the player picks a different loadout for the controlled
/// character.
#[derive(Debug)]
pub struct LoadoutSelectedEvent {
    pub loadout_id: String,
}

impl Message for LoadoutSelectedEvent {}
