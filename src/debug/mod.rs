//! Debug tooling for fast iteration on action loadouts.
//!
//! Features:
//! - F1 info overlay with the current action and shared state
//! - Ctrl+I invincibility, Ctrl+R rings and emeralds
//! - Ctrl+L cycle through the loaded loadouts
//! - Ctrl+T dump the recorded action transitions as JSON

mod state;
mod systems;
mod ui;

pub use state::{ActionTrace, DebugState, TraceEntry};

use bevy::prelude::*;

use crate::debug::systems::{
    apply_invincibility, handle_debug_hotkeys, record_transitions, update_debug_info_overlay,
    update_status_message,
};

pub const TRACE_DUMP_PATH: &str = "action_trace.json";

/// Marker for debug info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .init_resource::<ActionTrace>()
            .add_systems(FixedPostUpdate, record_transitions)
            .add_systems(
                Update,
                (handle_debug_hotkeys, update_status_message, apply_invincibility).chain(),
            )
            .add_systems(
                Update,
                update_debug_info_overlay.run_if(|state: Res<DebugState>| {
                    state.show_info || state.is_changed()
                }),
            );
    }
}
