//! Actions domain: messages forwarded from each step's effect outbox.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::actions::effects::{AnimationCommand, CameraRequest, SoundCue};
use crate::actions::slot::Transition;

/// Animator parameter change or clip request for an entity
#[derive(Debug, Clone)]
pub struct AnimationRequested {
    pub entity: Entity,
    pub command: AnimationCommand,
}

impl Message for AnimationRequested {}

/// One-shot sound for an entity
#[derive(Debug, Clone)]
pub struct SoundRequested {
    pub entity: Entity,
    pub cue: SoundCue,
}

impl Message for SoundRequested {}

#[derive(Debug, Clone)]
pub struct CameraRequested {
    pub entity: Entity,
    pub request: CameraRequest,
}

impl Message for CameraRequested {}

/// Lifecycle change of an action, for tooling
#[derive(Debug, Clone)]
pub struct ActionTransition {
    pub entity: Entity,
    pub transition: Transition,
}

impl Message for ActionTransition {}
