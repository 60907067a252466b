//! Data definitions for RON content files.
//!
//! Loadouts and tuning are deserialized straight into the action types;
//! this module only holds the shared list wrapper.

use serde::{Deserialize, Serialize};

/// Bumped whenever a list file changes shape.
pub const SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}
