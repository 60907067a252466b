//! ContentRegistry resource providing lookups for loaded loadouts.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::actions::{CompositionError, Loadout, PrimaryActionSlot, compose};

/// Central registry for all loaded game content.
#[derive(Resource, Default, Debug)]
pub struct ContentRegistry {
    pub loadouts: HashMap<String, Loadout>,
}

impl ContentRegistry {
    /// Registry holding the built-in character presets.
    pub fn with_presets() -> Self {
        Self {
            loadouts: Loadout::presets()
                .into_iter()
                .map(|loadout| (loadout.id.clone(), loadout))
                .collect(),
        }
    }

    pub fn loadout(&self, id: &str) -> Option<&Loadout> {
        self.loadouts.get(id)
    }

    /// Build a slot from the loadout registered under `id`.
    pub fn compose(&self, id: &str) -> Result<PrimaryActionSlot, CompositionError> {
        let loadout = self
            .loadout(id)
            .ok_or_else(|| CompositionError::UnknownLoadout(id.to_string()))?;
        compose(loadout)
    }

    /// Loadout ids in a stable order for cycling.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.loadouts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Id following `current`, wrapping around.
    pub fn next_id(&self, current: &str) -> Option<&str> {
        let ids = self.ids();
        let next = match ids.iter().position(|id| *id == current) {
            Some(index) => (index + 1) % ids.len(),
            None => 0,
        };
        ids.get(next).copied()
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Loadouts: {} ({})",
            self.loadouts.len(),
            self.ids().join(", "),
        )
    }

    /// Returns total count of all loaded items.
    pub fn total_count(&self) -> usize {
        self.loadouts.len()
    }
}
