//! Movement domain: locomotion applied after the action step, plus the
//! collider profile and respawn follow-ups.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::actions::state::{CharacterState, Facing};
use crate::actions::snapshot::{InputSnapshot, PhysicsSnapshot};
use crate::actions::{ActionController, ActionFrame, ActionId, ActionKind, ActionTransition, TransitionKind};
use crate::core::GameplayPaused;
use crate::movement::{LocomotionTuning, Player, SpawnPoint};

fn approach(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

/// Resolve the velocity for this step from the state the actions left
/// behind, the player's input and gravity.
pub(crate) fn integrate(
    state: &mut CharacterState,
    physics: &PhysicsSnapshot,
    input: &InputSnapshot,
    tuning: &LocomotionTuning,
    dt: f32,
) -> Vec2 {
    let mut velocity = state.velocity;
    let axis = input.horizontal();
    let tangent = physics.tangent();
    let normal = tangent.perp();
    let on_ground = physics.grounded && velocity.dot(normal) <= tuning.liftoff_speed;

    if on_ground {
        let mut speed = velocity.dot(tangent);
        if state.input_restriction.allows_horizontal() {
            if input.opposes(speed) {
                speed = approach(speed, 0.0, tuning.decel * dt);
            } else if axis != 0.0 {
                // Input never pushes past top speed but keeps momentum above it
                if speed.abs() < tuning.max_speed {
                    speed = approach(speed, axis * tuning.max_speed, tuning.accel * dt);
                }
            } else {
                speed = approach(speed, 0.0, tuning.friction * dt);
            }
        }
        velocity = tangent * speed;
        state.ground_speed = speed;
    } else {
        if state.input_restriction.allows_horizontal()
            && axis != 0.0
            && (velocity.x.abs() < tuning.max_speed || input.opposes(velocity.x))
        {
            velocity.x = approach(velocity.x, axis * tuning.max_speed, tuning.air_accel * dt);
        }
        velocity.y -= tuning.gravity * state.gravity_scale * dt;
        velocity.y = velocity.y.max(-tuning.max_fall_speed);
        state.ground_speed = velocity.x;
    }

    if state.input_restriction.allows_horizontal() {
        if let Some(facing) = Facing::from_sign(axis) {
            state.facing = facing;
        }
    }

    state.velocity = velocity;
    velocity
}

pub(crate) fn apply_locomotion(
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<(&mut ActionController, &mut ActionFrame, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut controller, mut frame, mut linear) in &mut query {
        // Each snapshot drives exactly one step
        let Some(physics) = frame.0.physics.take() else {
            continue;
        };
        linear.0 = integrate(&mut controller.state, &physics, &frame.0.input, &tuning, dt);
    }
}

/// Swap the collider and sprite to the profile the active action requires,
/// keeping the feet where they were.
pub(crate) fn apply_size_mode(
    mut query: Query<(&ActionController, &mut Collider, &mut Sprite, &mut Transform), With<Player>>,
) {
    for (controller, mut collider, mut sprite, mut transform) in &mut query {
        sprite.flip_x = controller.state.facing == Facing::Left;

        let size = controller.state.size_mode.extents();
        let current = match collider.shape_scaled().as_cuboid() {
            Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y) * 2.0,
            None => size,
        };
        if current == size {
            continue;
        }

        *collider = Collider::rectangle(size.x, size.y);
        sprite.custom_size = Some(size);
        transform.translation.y += (size.y - current.y) * 0.5;
    }
}

pub(crate) fn respawn_after_death(
    mut transitions: MessageReader<ActionTransition>,
    mut query: Query<(&SpawnPoint, &mut Transform, &mut LinearVelocity), With<Player>>,
) {
    for event in transitions.read() {
        let transition = event.transition;
        if transition.action != ActionId::Primary(ActionKind::Die)
            || transition.change != TransitionKind::Exited
        {
            continue;
        }
        let Ok((spawn, mut transform, mut velocity)) = query.get_mut(event.entity) else {
            continue;
        };
        info!("respawning {} at {}", event.entity, spawn.0);
        transform.translation = spawn.0.extend(transform.translation.z);
        velocity.0 = Vec2::ZERO;
    }
}

/// Stop the solver while gameplay is paused so bodies keep their place.
pub(crate) fn sync_physics_pause(paused: Res<GameplayPaused>, mut time: ResMut<Time<Physics>>) {
    if !paused.is_changed() {
        return;
    }
    if paused.is_paused() {
        time.pause();
    } else {
        time.unpause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::snapshot::ButtonState;
    use crate::actions::state::InputRestriction;

    const DT: f32 = 1.0 / 60.0;

    fn right() -> InputSnapshot {
        InputSnapshot {
            axis: Vec2::X,
            jump: ButtonState::default(),
            special: ButtonState::default(),
        }
    }

    #[test]
    fn test_ground_acceleration_respects_top_speed() {
        let tuning = LocomotionTuning::default();
        let mut state = CharacterState::default();
        let physics = PhysicsSnapshot::grounded();

        let v = integrate(&mut state, &physics, &right(), &tuning, DT);
        assert!((v.x - tuning.accel * DT).abs() < 1e-4);
        assert_eq!(v.y, 0.0);

        state.velocity = Vec2::new(tuning.max_speed + 100.0, 0.0);
        let v = integrate(&mut state, &physics, &right(), &tuning, DT);
        assert_eq!(v.x, tuning.max_speed + 100.0);
    }

    #[test]
    fn test_locked_input_keeps_action_speed() {
        let tuning = LocomotionTuning::default();
        let mut state = CharacterState {
            input_restriction: InputRestriction::LockHorizontal,
            velocity: Vec2::new(200.0, 0.0),
            facing: Facing::Right,
            ..Default::default()
        };
        let input = InputSnapshot {
            axis: Vec2::NEG_X,
            ..right()
        };

        let v = integrate(&mut state, &PhysicsSnapshot::grounded(), &input, &tuning, DT);
        assert_eq!(v.x, 200.0);
        assert_eq!(state.facing, Facing::Right);
    }

    #[test]
    fn test_gravity_scaled_and_clamped_in_air() {
        let tuning = LocomotionTuning::default();
        let mut state = CharacterState {
            gravity_scale: 0.5,
            ..Default::default()
        };
        let physics = PhysicsSnapshot::airborne(Vec2::ZERO);

        let v = integrate(&mut state, &physics, &InputSnapshot::default(), &tuning, DT);
        assert!((v.y + tuning.gravity * 0.5 * DT).abs() < 1e-4);

        state.velocity = Vec2::new(0.0, -tuning.max_fall_speed);
        let v = integrate(&mut state, &physics, &InputSnapshot::default(), &tuning, DT);
        assert_eq!(v.y, -tuning.max_fall_speed);
    }

    #[test]
    fn test_jump_launch_leaves_ground() {
        let tuning = LocomotionTuning::default();
        let mut state = CharacterState {
            velocity: Vec2::new(0.0, 390.0),
            ..Default::default()
        };

        let v = integrate(
            &mut state,
            &PhysicsSnapshot::grounded(),
            &InputSnapshot::default(),
            &tuning,
            DT,
        );
        assert!(v.y > 370.0);
    }
}
