//! Core domain: game state, fixed step rate and shared run resources.

pub mod events;
pub mod resources;
pub mod state;
pub mod step;
mod systems;

pub use events::LoadoutSelectedEvent;
pub use resources::{GameplayPaused, SelectedCharacter, gameplay_active};
pub use state::GameState;
pub use step::{STEP_RATE_HZ, STEP_SECS, secs_from_steps, steps_from_secs};

use bevy::prelude::*;

use systems::{handle_loadout_selected, setup_camera, toggle_pause, transition_to_run};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .insert_resource(Time::<Fixed>::from_hz(f64::from(STEP_RATE_HZ)))
            .init_resource::<GameplayPaused>()
            .init_resource::<SelectedCharacter>()
            .add_message::<LoadoutSelectedEvent>()
            .add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Boot), transition_to_run)
            .add_systems(Update, (toggle_pause, handle_loadout_selected).chain());
    }
}
