//! Movement domain: the physics host around the action scheduler.
//!
//! Each fixed step the sensors turn ray casts, overlaps and the latched
//! keyboard state into the player's [`ActionFrame`](crate::actions::ActionFrame);
//! after the actions tick, locomotion integrates the shared velocity and
//! writes it back to avian.

mod bootstrap;
pub mod components;
pub mod resources;
pub(crate) mod systems;

pub use components::{
    Badnik, Bounds, GameLayer, Goal, Ground, Hazard, Player, RingPickup, ShieldPickup,
    SpawnPoint, Wall,
};
pub use resources::{InputLatch, LatchedButton, LocomotionTuning};

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};
use crate::movement::bootstrap::{recompose_on_selection, spawn_player, spawn_stage};
use crate::movement::systems::{
    apply_locomotion, apply_size_mode, latch_input, respawn_after_death, sample_input,
    sense_ground, sense_world, sync_physics_pause,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionTuning>()
            .init_resource::<InputLatch>()
            .add_systems(OnEnter(GameState::Run), (spawn_stage, spawn_player))
            .add_systems(Update, (latch_input, sync_physics_pause))
            .add_systems(
                Update,
                recompose_on_selection.run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                (sample_input, sense_ground, sense_world)
                    .chain()
                    .run_if(gameplay_active),
            )
            .add_systems(
                FixedUpdate,
                (apply_locomotion, apply_size_mode, respawn_after_death)
                    .chain()
                    .run_if(gameplay_active),
            );
    }
}
