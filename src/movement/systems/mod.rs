//! Movement domain: system modules for the sensor, input and locomotion
//! bridges around the action step.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::{sense_ground, sense_world};
pub(crate) use input::{latch_input, sample_input};
pub(crate) use movement::{apply_locomotion, apply_size_mode, respawn_after_death, sync_physics_pause};
