//! Movement domain: ground, wall and world sensors feeding the action frame.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actions::snapshot::{
    DamageContact, HomingTarget, PhysicsSnapshot, WallContact, WallSide, WorldSnapshot,
};
use crate::actions::{ActionController, ActionFrame};
use crate::movement::{
    Badnik, Bounds, GameLayer, Goal, Hazard, LocomotionTuning, Player, RingPickup, ShieldPickup,
};

/// Foot and wall rays start this far inside the collider so a body resting
/// on a surface still reports the hit.
const RAY_INSET: f32 = 2.0;

fn half_extents(collider: &Collider) -> Vec2 {
    match collider.shape_scaled().as_cuboid() {
        Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
        None => Vec2::new(9.0, 19.0),
    }
}

/// Counter-clockwise surface angle for a ground normal; 0 on flat ground.
pub(crate) fn ground_angle(normal: Vec2) -> f32 {
    (-normal.x).atan2(normal.y)
}

/// Axis-aligned overlap of two boxes given by centre and half extents.
pub(crate) fn overlaps(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2) -> bool {
    let delta = (a - b).abs();
    delta.x <= a_half.x + b_half.x && delta.y <= a_half.y + b_half.y
}

pub(crate) fn sense_ground(
    spatial_query: SpatialQuery,
    tuning: Res<LocomotionTuning>,
    mut query: Query<(&Transform, &Collider, &LinearVelocity, &mut ActionFrame), With<Player>>,
) {
    // Feet and ceiling only collide with ground; walls are sensed separately
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);
    let terrain_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, collider, velocity, mut frame) in &mut query {
        let half = half_extents(collider);
        let position = transform.translation.truncate();
        let velocity = velocity.0;

        let foot_x = half.x * tuning.foot_spread;
        let mut normals = Vec::with_capacity(2);
        for offset in [-foot_x, foot_x] {
            let origin = position + Vec2::new(offset, -half.y + RAY_INSET);
            if let Some(hit) = spatial_query.cast_ray(
                origin,
                Dir2::NEG_Y,
                tuning.foot_ray_length + RAY_INSET,
                true,
                &ground_filter,
            ) {
                normals.push(hit.normal);
            }
        }

        let normal = if normals.is_empty() {
            Vec2::Y
        } else {
            normals.iter().copied().sum::<Vec2>().normalize_or(Vec2::Y)
        };
        // Still in contact, but moving off the surface (jump launch)
        let grounded = !normals.is_empty() && velocity.dot(normal) <= tuning.liftoff_speed;

        let wall_reach = half.x + tuning.wall_reach_margin;
        let upper = position + Vec2::new(0.0, half.y - RAY_INSET);
        let mut wall = None;
        for (side, dir) in [(WallSide::Left, Dir2::NEG_X), (WallSide::Right, Dir2::X)] {
            if spatial_query
                .cast_ray(position, dir, wall_reach, true, &wall_filter)
                .is_some()
            {
                let ledge_top = spatial_query
                    .cast_ray(upper, dir, wall_reach, true, &wall_filter)
                    .is_none();
                wall = Some(WallContact { side, ledge_top });
                break;
            }
        }

        let head = position + Vec2::new(0.0, half.y - RAY_INSET);
        let ceiling_clearance = spatial_query
            .cast_ray(head, Dir2::Y, tuning.ceiling_reach + RAY_INSET, true, &terrain_filter)
            .map(|hit| (hit.distance - RAY_INSET).max(0.0));

        frame.0.physics = Some(PhysicsSnapshot {
            grounded,
            position,
            velocity,
            ground_angle: if grounded { ground_angle(normal) } else { 0.0 },
            ground_hits: normals.len() as u8,
            wall,
            ceiling_clearance,
        });
    }
}

/// Gather hazards, pickups, the goal and homing candidates around the player.
/// Touching a badnik while attacking destroys it; otherwise it hurts.
pub(crate) fn sense_world(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    badniks: Query<(Entity, &Badnik, &Transform, &Bounds)>,
    hazards: Query<(&Hazard, &Transform, &Bounds)>,
    goals: Query<(&Transform, &Bounds), With<Goal>>,
    rings: Query<(Entity, &RingPickup, &Transform, &Bounds)>,
    shields: Query<(Entity, &ShieldPickup, &Transform, &Bounds)>,
    mut players: Query<
        (&Transform, &Collider, &mut ActionController, &mut ActionFrame),
        With<Player>,
    >,
) {
    let terrain_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, collider, mut controller, mut frame) in &mut players {
        let position = transform.translation.truncate();
        let half = half_extents(collider);
        let state = &mut controller.state;
        let mut world = WorldSnapshot::default();

        for (hazard, hazard_transform, bounds) in &hazards {
            let at = hazard_transform.translation.truncate();
            if !overlaps(position, half, at, bounds.0) {
                continue;
            }
            if hazard.lethal {
                world.lethal_hazard = true;
            } else {
                world.damage = Some(DamageContact { source_x: at.x });
            }
        }

        for (entity, badnik, badnik_transform, bounds) in &badniks {
            let at = badnik_transform.translation.truncate();
            if overlaps(position, half, at, bounds.0) {
                if state.attacking {
                    debug!("badnik {} destroyed", badnik.id);
                    world.contacted_targets.push(badnik.id);
                    commands.entity(entity).despawn();
                    continue;
                }
                world.damage.get_or_insert(DamageContact { source_x: at.x });
            }

            let obstructed = Dir2::new(at - position).ok().is_some_and(|dir| {
                spatial_query
                    .cast_ray(position, dir, position.distance(at), true, &terrain_filter)
                    .is_some()
            });
            world.homing_targets.push(HomingTarget {
                id: badnik.id,
                position: at,
                obstructed,
            });
        }

        world.goal_reached = goals
            .iter()
            .any(|(goal, bounds)| overlaps(position, half, goal.translation.truncate(), bounds.0));

        for (entity, ring, ring_transform, bounds) in &rings {
            if overlaps(position, half, ring_transform.translation.truncate(), bounds.0) {
                state.rings += ring.amount;
                commands.entity(entity).despawn();
            }
        }

        for (entity, pickup, shield_transform, bounds) in &shields {
            if overlaps(position, half, shield_transform.translation.truncate(), bounds.0) {
                info!("picked up {:?} shield", pickup.0);
                state.shield = Some(pickup.0);
                commands.entity(entity).despawn();
            }
        }

        frame.0.world = world;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_touching_edges() {
        let half = Vec2::splat(5.0);
        assert!(overlaps(Vec2::ZERO, half, Vec2::new(10.0, 0.0), half));
        assert!(!overlaps(Vec2::ZERO, half, Vec2::new(10.5, 0.0), half));
        assert!(!overlaps(Vec2::ZERO, half, Vec2::new(0.0, -12.0), half));
    }

    #[test]
    fn test_ground_angle_follows_slope() {
        assert_eq!(ground_angle(Vec2::Y), 0.0);

        // Ground rising to the right has a normal leaning left
        let normal = Vec2::new(-1.0, 1.0).normalize();
        let angle = ground_angle(normal);
        assert!((angle - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
    }
}
