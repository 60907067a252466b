//! Core domain: run flow and selection systems.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::bridges::CameraRig;
use crate::core::events::LoadoutSelectedEvent;
use crate::core::resources::{GameplayPaused, SelectedCharacter};
use crate::core::state::GameState;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, CameraRig::default()));
}

pub(crate) fn transition_to_run(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Run);
}

pub(crate) fn toggle_pause(keyboard: Res<ButtonInput<KeyCode>>, mut paused: ResMut<GameplayPaused>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        paused.toggle("menu");
        info!("Gameplay paused: {}", paused.is_paused());
    }
}

pub(crate) fn handle_loadout_selected(
    mut events: MessageReader<LoadoutSelectedEvent>,
    mut selected: ResMut<SelectedCharacter>,
) {
    for event in events.read() {
        info!("Loadout selected: {}", event.loadout_id);
        selected.select(event.loadout_id.clone());
    }
}
