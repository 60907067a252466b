//! Actions domain: read-only per-step snapshots produced by the sensor,
//! input and world bridges.

use bevy::prelude::*;

use crate::actions::state::Facing;

/// Dead zone applied to the directional axis.
pub const AXIS_DEADZONE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    pub fn sign(self) -> f32 {
        match self {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub side: WallSide,
    /// The upper wall ray found no wall: the top edge is within reach.
    pub ledge_top: bool,
}

/// Collision results for one entity, computed by the physics host.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsSnapshot {
    pub grounded: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Ground-contact angle in radians, counter-clockwise; 0 on flat ground
    pub ground_angle: f32,
    /// Number of foot sensors touching ground (0..=2)
    pub ground_hits: u8,
    pub wall: Option<WallContact>,
    /// Distance to a ceiling above the head, if one is within sensor range
    pub ceiling_clearance: Option<f32>,
}

impl Default for PhysicsSnapshot {
    fn default() -> Self {
        Self {
            grounded: false,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            ground_angle: 0.0,
            ground_hits: 0,
            wall: None,
            ceiling_clearance: None,
        }
    }
}

impl PhysicsSnapshot {
    /// Flat ground under both feet.
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ground_hits: 2,
            ..Default::default()
        }
    }

    pub fn airborne(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Unit vector along the ground surface.
    pub fn tangent(&self) -> Vec2 {
        Vec2::new(self.ground_angle.cos(), self.ground_angle.sin())
    }

    /// Signed speed along the ground; plain horizontal speed in the air.
    pub fn ground_speed(&self) -> f32 {
        if self.grounded {
            self.velocity.dot(self.tangent())
        } else {
            self.velocity.x
        }
    }

    pub fn wall_ahead(&self, facing: Facing) -> bool {
        self.wall.is_some_and(|wall| wall.side.sign() == facing.sign())
    }

    pub fn low_ceiling(&self, min_clearance: f32) -> bool {
        self.ceiling_clearance
            .is_some_and(|clearance| clearance < min_clearance)
    }

    /// Standing with only one foot sensor on the ground.
    pub fn on_ledge(&self) -> bool {
        self.grounded && self.ground_hits == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Jump,
    /// Secondary button (super transform)
    Special,
}

/// Edges of a single button for the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

impl ButtonState {
    /// Derive edges from the held level on the previous and current step.
    pub fn from_levels(was_held: bool, is_held: bool) -> Self {
        Self {
            pressed: is_held && !was_held,
            held: is_held,
            released: was_held && !is_held,
        }
    }

    pub fn just_pressed() -> Self {
        Self::from_levels(false, true)
    }

    pub fn holding() -> Self {
        Self::from_levels(true, true)
    }

    pub fn just_released() -> Self {
        Self::from_levels(true, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub axis: Vec2,
    pub jump: ButtonState,
    pub special: ButtonState,
}

impl InputSnapshot {
    pub fn button(&self, button: Button) -> ButtonState {
        match button {
            Button::Jump => self.jump,
            Button::Special => self.special,
        }
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.button(button).pressed
    }

    pub fn held(&self, button: Button) -> bool {
        self.button(button).held
    }

    pub fn released(&self, button: Button) -> bool {
        self.button(button).released
    }

    /// Horizontal input collapsed to -1, 0 or 1.
    pub fn horizontal(&self) -> f32 {
        if self.axis.x > AXIS_DEADZONE {
            1.0
        } else if self.axis.x < -AXIS_DEADZONE {
            -1.0
        } else {
            0.0
        }
    }

    pub fn horizontal_held(&self) -> bool {
        self.horizontal() != 0.0
    }

    pub fn down_held(&self) -> bool {
        self.axis.y < -AXIS_DEADZONE
    }

    pub fn up_held(&self) -> bool {
        self.axis.y > AXIS_DEADZONE
    }

    /// Holding a direction whose sign opposes `value`.
    pub fn opposes(&self, value: f32) -> bool {
        let h = self.horizontal();
        h != 0.0 && value != 0.0 && h.signum() != value.signum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageContact {
    pub source_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomingTarget {
    pub id: u32,
    pub position: Vec2,
    /// Terrain blocks the line of sight from the entity
    pub obstructed: bool,
}

/// Gameplay facts about the world around the entity for this step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldSnapshot {
    pub damage: Option<DamageContact>,
    /// Pit, crush or drowning: death regardless of rings
    pub lethal_hazard: bool,
    pub goal_reached: bool,
    pub homing_targets: Vec<HomingTarget>,
    /// Targets the entity touched this step
    pub contacted_targets: Vec<u32>,
}

impl WorldSnapshot {
    pub fn target(&self, id: u32) -> Option<&HomingTarget> {
        self.homing_targets.iter().find(|t| t.id == id)
    }
}

/// Everything the scheduler consumes for one step. A missing physics
/// snapshot makes the step unrunnable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub physics: Option<PhysicsSnapshot>,
    pub input: InputSnapshot,
    pub world: WorldSnapshot,
}

impl Frame {
    pub fn new(physics: PhysicsSnapshot, input: InputSnapshot) -> Self {
        Self {
            physics: Some(physics),
            input,
            world: WorldSnapshot::default(),
        }
    }

    pub fn with_world(mut self, world: WorldSnapshot) -> Self {
        self.world = world;
        self
    }
}
