//! Content domain: RON-backed action tuning and character loadouts.

pub mod data;
pub mod loader;
pub mod registry;
pub mod validation;

#[cfg(test)]
mod tests;

pub use data::DataFile;
pub use loader::{ContentLoadError, load_all_content};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content};

use bevy::prelude::*;
use std::path::Path;

pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content);
    }
}

fn load_content(mut commands: Commands) {
    let (mut registry, tuning) = match load_all_content(Path::new(CONTENT_DIR)) {
        Ok(loaded) => loaded,
        Err(errors) => {
            for error in &errors {
                warn!("{error}");
            }
            warn!("Content failed to load, using built-in loadouts and default tuning");
            (ContentRegistry::with_presets(), crate::actions::ActionTuning::default())
        }
    };

    let errors = validate_content(&registry);
    for error in &errors {
        warn!("{error}");
    }
    registry
        .loadouts
        .retain(|id, _| !errors.iter().any(|e| e.loadout_id == *id));
    if registry.total_count() == 0 {
        warn!("No usable loadouts, falling back to built-in presets");
        registry = ContentRegistry::with_presets();
    }

    info!("{}", registry.summary());
    commands.insert_resource(registry);
    commands.insert_resource(tuning);
}
