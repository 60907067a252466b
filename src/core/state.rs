//! Core domain: top-level game states.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Content is loading
    #[default]
    Boot,
    /// The stage is live and controlled entities are ticking
    Run,
}
