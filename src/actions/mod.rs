//! Actions domain: composable character actions and their per-entity
//! scheduler.
//!
//! Each controlled entity owns a [`PrimaryActionSlot`] built from a
//! [`Loadout`]. Once per fixed step the slot fires due timers, polls the
//! guards of every registered action in priority order, launches at most
//! one, and then either exits or performs the current action. Sub-actions
//! nest inside one activation of their hosting primary (`Jump`).
//!
//! The slot itself is plain Rust; this plugin only feeds it the frame
//! gathered by the movement sensors and forwards its effects as messages.

pub mod catalog;
pub mod components;
pub mod contract;
pub mod effects;
pub mod error;
pub mod events;
pub mod kinds;
pub mod primary;
pub mod resources;
pub mod slot;
pub mod snapshot;
pub mod state;
pub mod sub;
pub mod sub_slot;
pub mod timer;
pub mod tuning;

mod systems;

#[cfg(test)]
mod tests;

pub use catalog::{Loadout, compose, review};
pub use components::{ActionController, ActionFrame};
pub use contract::{Action, ActionContext, ActionView, PrimaryAction, SubAction};
pub use effects::{AnimParam, AnimationCommand, AnimationTag, CameraRequest, Effects, SoundCue};
pub use error::{CompositionError, TickError, TickFailure};
pub use events::{ActionTransition, AnimationRequested, CameraRequested, SoundRequested};
pub use kinds::{ActionId, ActionKind, ExitReason, Lifecycle, SubActionKind};
pub use resources::ActionSettings;
pub use slot::{PrimaryActionSlot, TickReport, Transition, TransitionKind};
pub use snapshot::{Frame, InputSnapshot, PhysicsSnapshot, WorldSnapshot};
pub use state::{CharacterState, Facing, InputRestriction, ShieldKind, SizeMode};
pub use sub_slot::SubActionSlot;
pub use tuning::ActionTuning;

use bevy::prelude::*;

use crate::core::resources::gameplay_active;
use crate::movement::systems::{apply_locomotion, sense_world};

pub(crate) use systems::tick_actions;

pub struct ActionsPlugin;

impl Plugin for ActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionTuning>()
            .init_resource::<ActionSettings>()
            .add_message::<AnimationRequested>()
            .add_message::<SoundRequested>()
            .add_message::<CameraRequested>()
            .add_message::<ActionTransition>()
            .add_systems(
                FixedUpdate,
                tick_actions
                    .after(sense_world)
                    .before(apply_locomotion)
                    .run_if(gameplay_active),
            );
    }
}
