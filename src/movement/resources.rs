//! Movement domain: locomotion tuning and the input latch.

use bevy::prelude::*;

use crate::actions::snapshot::ButtonState;

#[derive(Resource, Debug, Clone)]
pub struct LocomotionTuning {
    pub max_speed: f32,
    pub accel: f32,
    /// Braking when holding against the direction of travel
    pub decel: f32,
    /// Slowdown on the ground with no input
    pub friction: f32,
    pub air_accel: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Length of each foot ray below the collider
    pub foot_ray_length: f32,
    /// Foot ray offset from the centre, as a fraction of the half width
    pub foot_spread: f32,
    /// Reach of the wall rays beyond the collider
    pub wall_reach_margin: f32,
    pub ceiling_reach: f32,
    /// Speed away from the ground surface above which the body counts as
    /// leaving it
    pub liftoff_speed: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            max_speed: 360.0,
            accel: 168.75,
            decel: 1800.0,
            friction: 168.75,
            air_accel: 337.5,
            gravity: 787.5,
            max_fall_speed: 960.0,
            foot_ray_length: 6.0,
            foot_spread: 0.8,
            wall_reach_margin: 4.0,
            ceiling_reach: 32.0,
            liftoff_speed: 1.0,
        }
    }
}

/// Button edges are collected every render frame and consumed once per
/// fixed step, so a tap between two steps is never lost.
#[derive(Resource, Debug, Default)]
pub struct InputLatch {
    pub axis: Vec2,
    pub jump: LatchedButton,
    pub special: LatchedButton,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LatchedButton {
    pub held: bool,
    pressed: bool,
    released: bool,
}

impl LatchedButton {
    pub fn update(&mut self, just_pressed: bool, held: bool, just_released: bool) {
        self.pressed |= just_pressed;
        self.released |= just_released;
        self.held = held;
    }

    /// Edges seen since the last step, then clear them.
    pub fn take(&mut self) -> ButtonState {
        let state = ButtonState {
            pressed: self.pressed,
            held: self.held || self.pressed,
            released: self.released && !self.held,
        };
        self.pressed = false;
        self.released = false;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_between_steps_is_latched() {
        let mut button = LatchedButton::default();
        button.update(true, true, false);
        button.update(false, false, true);

        let state = button.take();
        assert!(state.pressed);
        assert!(state.held);
        assert!(state.released);

        let next = button.take();
        assert_eq!(next, ButtonState::default());
    }

    #[test]
    fn test_held_button_reports_no_edges() {
        let mut button = LatchedButton::default();
        button.update(true, true, false);
        button.take();
        button.update(false, true, false);

        assert_eq!(button.take(), ButtonState::holding());
    }
}
