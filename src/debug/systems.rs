//! Debug domain: hotkeys, trace recording and the info overlay.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use std::fs;

use crate::actions::{ActionController, ActionTransition};
use crate::content::ContentRegistry;
use crate::core::{LoadoutSelectedEvent, SelectedCharacter};
use crate::debug::ui::spawn_debug_info_overlay;
use crate::debug::{ActionTrace, DebugInfoOverlay, DebugState, TRACE_DUMP_PATH, TraceEntry};
use crate::movement::Player;

pub(crate) fn record_transitions(
    mut transitions: MessageReader<ActionTransition>,
    mut trace: ResMut<ActionTrace>,
) {
    for event in transitions.read() {
        debug!(
            "[TRACE] {} step {}: {} {:?}",
            event.entity, event.transition.step, event.transition.action, event.transition.change
        );
        trace.push(TraceEntry::from(event));
    }
}

/// Handle debug hotkeys (Ctrl + key).
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut trace: ResMut<ActionTrace>,
    selected: Res<SelectedCharacter>,
    registry: Option<Res<ContentRegistry>>,
    mut selections: MessageWriter<LoadoutSelectedEvent>,
    mut player_query: Query<&mut ActionController, With<Player>>,
) {
    // F1: Toggle info overlay
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_info = !debug_state.show_info;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+I: Toggle invincibility
    if keyboard.just_pressed(KeyCode::KeyI) {
        debug_state.invincible = !debug_state.invincible;
        let msg = if debug_state.invincible {
            "Invincibility ON"
        } else {
            "Invincibility OFF"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] {}", msg);
    }

    // Ctrl+L: Cycle loadout
    if keyboard.just_pressed(KeyCode::KeyL) {
        let next = registry
            .as_deref()
            .and_then(|reg| reg.next_id(&selected.loadout_id))
            .map(str::to_string);
        if let Some(loadout_id) = next {
            debug_state.set_message(format!("Loadout: {loadout_id}"), 2.0);
            selections.write(LoadoutSelectedEvent { loadout_id });
        }
    }

    // Ctrl+R: Rings and emeralds for the super transform
    if keyboard.just_pressed(KeyCode::KeyR) {
        for mut controller in &mut player_query {
            controller.state.rings += 50;
            controller.state.emeralds = 7;
        }
        debug_state.set_message("+50 rings, all emeralds", 2.0);
        info!("[DEBUG] Granted rings and emeralds");
    }

    // Ctrl+T: Dump the action trace
    if keyboard.just_pressed(KeyCode::KeyT) {
        match trace.to_json() {
            Ok(json) => match fs::write(TRACE_DUMP_PATH, json) {
                Ok(()) => {
                    info!("[DEBUG] Wrote {} transitions to {}", trace.len(), TRACE_DUMP_PATH);
                    debug_state.set_message(format!("Trace dumped ({})", trace.len()), 2.0);
                    trace.clear();
                }
                Err(e) => warn!("[DEBUG] Failed to write {}: {}", TRACE_DUMP_PATH, e),
            },
            Err(e) => warn!("[DEBUG] Failed to serialize trace: {}", e),
        }
    }
}

pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Keep the player's post-hurt invulnerability topped up
pub(crate) fn apply_invincibility(
    debug_state: Res<DebugState>,
    mut player_query: Query<&mut ActionController, With<Player>>,
) {
    if !debug_state.invincible {
        return;
    }

    for mut controller in &mut player_query {
        controller.state.invulnerable_steps = controller.state.invulnerable_steps.max(2);
    }
}

/// Update the debug info overlay with current player state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<(&Transform, &ActionController), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Ensure overlay exists
    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((transform, controller)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let pos = transform.translation;
        let state = &controller.state;
        let slot = &controller.slot;
        let status = debug_state
            .status_message
            .as_ref()
            .map(|(msg, _)| msg.as_str())
            .unwrap_or("");
        **text = format!(
            "Pos: ({:.0}, {:.0})\nVel: ({:.0}, {:.0})\nLoadout: {}\nAction: {:?} / {:?}\nStep: {}\nRings: {} Shield: {:?} Super: {}\nInvincible: {}\n{}",
            pos.x,
            pos.y,
            state.velocity.x,
            state.velocity.y,
            slot.loadout(),
            slot.current(),
            slot.current_sub(),
            slot.step(),
            state.rings,
            state.shield,
            state.super_form,
            debug_state.invincible,
            status,
        );
    }
}
