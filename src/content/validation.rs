//! Validation of loaded loadouts against the composition rules.

use thiserror::Error;

use super::registry::ContentRegistry;
use crate::actions::{CompositionError, review};

/// A validation error with context about what failed.
#[derive(Debug, Error)]
#[error("invalid content: {source}")]
pub struct ValidationError {
    pub loadout_id: String,
    #[source]
    pub source: CompositionError,
}

/// Review every loadout; a rejected loadout cannot be composed.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for id in registry.ids() {
        let Some(loadout) = registry.loadout(id) else {
            continue;
        };
        if let Err(source) = review(loadout) {
            errors.push(ValidationError {
                loadout_id: id.to_string(),
                source,
            });
        }
    }
    errors
}
