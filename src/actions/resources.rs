//! Actions domain: scheduler-wide settings.

use bevy::prelude::*;

/// How the host reacts to a step that reported a contract problem.
#[derive(Resource, Debug, Clone)]
pub struct ActionSettings {
    /// Panic on contract violations instead of logging them
    pub halt_on_violation: bool,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            halt_on_violation: cfg!(debug_assertions),
        }
    }
}
