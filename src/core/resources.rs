//! Core domain: shared resources for pausing and loadout selection.

use bevy::prelude::*;
use std::collections::HashSet;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }

    /// Flip a single source on or off.
    pub fn toggle(&mut self, source: impl Into<String>) {
        let source = source.into();
        if !self.sources.remove(&source) {
            self.sources.insert(source);
        }
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

/// Loadout the controlled character is composed from.
#[derive(Resource, Debug)]
pub struct SelectedCharacter {
    pub loadout_id: String,
}

impl Default for SelectedCharacter {
    fn default() -> Self {
        Self {
            loadout_id: "sonic".to_string(),
        }
    }
}

impl SelectedCharacter {
    pub fn select(&mut self, loadout_id: impl Into<String>) {
        self.loadout_id = loadout_id.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_sources_stack() {
        let mut paused = GameplayPaused::default();
        paused.pause("menu");
        paused.pause("trace_dump");
        paused.unpause("menu");
        assert!(paused.is_paused());
        paused.toggle("trace_dump");
        assert!(!paused.is_paused());
        paused.toggle("menu");
        assert!(paused.is_paused());
    }
}
