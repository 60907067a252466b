//! Actions domain: entity-owned state shared by every action variant.
//!
//! The scheduler does not guard these fields; whichever action is active
//! mutates them and must put back what it changed in `on_end`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actions::snapshot::PhysicsSnapshot;

/// How much of the player's directional input the locomotion layer honours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputRestriction {
    #[default]
    Unrestricted,
    /// Horizontal acceleration from input is ignored (rolling, charging).
    LockHorizontal,
    /// All directional input is ignored (hurt, dying, scripted moves).
    LockAll,
}

impl InputRestriction {
    pub fn allows_horizontal(self) -> bool {
        matches!(self, InputRestriction::Unrestricted)
    }
}

/// Hurtbox/hitbox profile required while an action is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeMode {
    #[default]
    Regular,
    /// Curled into a ball (jumping, rolling, spindashing)
    Shrunk,
    Crouched,
    /// Flat, wide profile while gliding or sliding
    Gliding,
    /// Insta-shield burst
    Expanded,
}

impl SizeMode {
    /// Collider extents in world units for this profile.
    pub fn extents(self) -> Vec2 {
        match self {
            SizeMode::Regular => Vec2::new(18.0, 38.0),
            SizeMode::Shrunk => Vec2::new(14.0, 28.0),
            SizeMode::Crouched => Vec2::new(18.0, 26.0),
            SizeMode::Gliding => Vec2::new(30.0, 20.0),
            SizeMode::Expanded => Vec2::new(44.0, 44.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Facing for a signed horizontal value, `None` inside the dead zone.
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.1 {
            Some(Facing::Right)
        } else if value < -0.1 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShieldKind {
    Regular,
    Fire,
    Bubble,
    Lightning,
}

impl ShieldKind {
    /// Whether the shield grants a mid-air ability.
    pub fn is_elemental(self) -> bool {
        !matches!(self, ShieldKind::Regular)
    }
}

/// State owned by the controlled entity and mutated through the active action.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    pub input_restriction: InputRestriction,
    pub size_mode: SizeMode,
    pub facing: Facing,
    pub velocity: Vec2,
    /// Speed along the ground tangent, signed (positive = along +tangent)
    pub ground_speed: f32,
    /// Contacted hazards are defeated instead of hurting the entity
    pub attacking: bool,
    pub gravity_scale: f32,
    pub shield: Option<ShieldKind>,
    pub rings: u32,
    pub emeralds: u8,
    pub super_form: bool,
    /// Remaining post-hurt invulnerability
    pub invulnerable_steps: u32,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            input_restriction: InputRestriction::Unrestricted,
            size_mode: SizeMode::Regular,
            facing: Facing::Right,
            velocity: Vec2::ZERO,
            ground_speed: 0.0,
            attacking: false,
            gravity_scale: 1.0,
            shield: None,
            rings: 0,
            emeralds: 0,
            super_form: false,
            invulnerable_steps: 0,
        }
    }
}

impl CharacterState {
    /// Pull the velocities resolved by physics at the start of a step.
    pub fn sync_from(&mut self, physics: &PhysicsSnapshot) {
        self.velocity = physics.velocity;
        self.ground_speed = physics.ground_speed();
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_steps > 0 || self.super_form
    }

    /// Set ground speed and derive velocity along the ground tangent.
    pub fn set_ground_speed(&mut self, speed: f32, ground_angle: f32) {
        self.ground_speed = speed;
        self.velocity = Vec2::new(ground_angle.cos(), ground_angle.sin()) * speed;
    }

    /// Whether the entity carries no mutation left behind by an action.
    pub fn is_neutral(&self) -> bool {
        self.input_restriction == InputRestriction::Unrestricted
            && self.size_mode == SizeMode::Regular
            && self.gravity_scale == 1.0
    }
}
