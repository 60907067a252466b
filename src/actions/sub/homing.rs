//! Homing attack: lock onto the nearest visible target in range and fly
//! at it, or dash forward when nothing is in range.
//!
//! The target scan runs in `observe`, once per step while the attack is
//! waiting to launch. The guard itself only reads the scan result.

use bevy::prelude::*;

use crate::actions::contract::{Action, ActionContext, ActionView, SubAction};
use crate::actions::kinds::{ActionProfile, ExitReason, SubActionKind, TimerTag};
use crate::actions::snapshot::{HomingTarget, PhysicsSnapshot, WorldSnapshot};
use crate::actions::state::{Facing, SizeMode};
use crate::actions::sub::{air_press, elemental_shield};
use crate::actions::timer::TimerHandle;

const PROFILE: ActionProfile = ActionProfile::new(25, true, SizeMode::Shrunk);
const TIMEOUT: TimerTag = TimerTag(0);

#[derive(Default)]
pub struct HomingAttack {
    /// Latest scan result, refreshed while waiting to launch
    candidate: Option<u32>,
    target: Option<u32>,
    timeout: Option<TimerHandle>,
    timed_out: bool,
    saved_gravity: f32,
}

/// Nearest unobstructed target within `radius` of `origin`.
pub fn scan(origin: Vec2, radius: f32, targets: &[HomingTarget]) -> Option<u32> {
    targets
        .iter()
        .filter(|t| !t.obstructed)
        .map(|t| (t.id, t.position.distance_squared(origin)))
        .filter(|&(_, d2)| d2 <= radius * radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

impl HomingAttack {
    pub fn candidate(&self) -> Option<u32> {
        self.candidate
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    fn reached(&self, physics: &PhysicsSnapshot, world: &WorldSnapshot, hit_radius: f32) -> bool {
        let Some(id) = self.target else {
            return false;
        };
        world.contacted_targets.contains(&id)
            || world
                .target(id)
                .is_some_and(|t| t.position.distance(physics.position) <= hit_radius)
    }

    fn lost(&self, world: &WorldSnapshot) -> bool {
        self.target
            .is_some_and(|id| world.target(id).is_none_or(|t| t.obstructed))
    }
}

impl Action for HomingAttack {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn observe(&mut self, view: &ActionView<'_>) {
        self.candidate = scan(
            view.physics.position,
            view.tuning.homing_radius,
            &view.world.homing_targets,
        );
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        elemental_shield(view).is_none()
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        air_press(view)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        let tuning = ctx.tuning();
        self.target = self.candidate;
        self.saved_gravity = ctx.state.gravity_scale;
        ctx.state.gravity_scale = 0.0;
        self.timeout = Some(ctx.schedule(tuning.homing_timeout_steps, TIMEOUT));

        match self.target {
            Some(id) => debug!("homing onto target {id}"),
            None => {
                ctx.state.velocity =
                    Vec2::new(ctx.state.facing.sign() * tuning.homing_dash_speed, 0.0);
            }
        }
        ctx.effects.sound("homing");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        let Some(target) = self.target.and_then(|id| ctx.world().target(id)) else {
            return;
        };
        let direction = (target.position - ctx.physics().position).normalize_or_zero();
        ctx.state.velocity = direction * ctx.tuning().homing_speed;
        if let Some(facing) = Facing::from_sign(direction.x) {
            ctx.state.facing = facing;
        }
    }

    fn on_timer(&mut self, tag: TimerTag, _ctx: &mut ActionContext<'_>) {
        if tag == TIMEOUT {
            self.timeout = None;
            self.timed_out = true;
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        self.timed_out
            || view.grounded()
            || view.physics.wall_ahead(view.state.facing)
            || self.lost(view.world)
            || self.reached(view.physics, view.world, view.tuning.homing_hit_radius)
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.timeout);
        ctx.state.gravity_scale = self.saved_gravity;

        let hit = self.reached(ctx.physics(), ctx.world(), ctx.tuning().homing_hit_radius);
        if ctx.exit_reason() == Some(ExitReason::Natural) && hit {
            ctx.state.velocity = Vec2::new(0.0, ctx.tuning().homing_bounce_speed);
            ctx.effects.sound("homing_hit");
            // Bouncing off a target allows chaining into the next one.
            ctx.release_parent();
        }
    }

    fn reset(&mut self) {
        self.candidate = None;
        self.target = None;
        self.timeout = None;
        self.timed_out = false;
        self.saved_gravity = 0.0;
    }
}

impl SubAction for HomingAttack {
    fn kind(&self) -> SubActionKind {
        SubActionKind::HomingAttack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: u32, x: f32, y: f32, obstructed: bool) -> HomingTarget {
        HomingTarget {
            id,
            position: Vec2::new(x, y),
            obstructed,
        }
    }

    #[test]
    fn scan_picks_nearest_visible_target() {
        let targets = [
            target(1, 100.0, 0.0, false),
            target(2, 40.0, 0.0, true),
            target(3, 60.0, 30.0, false),
        ];
        assert_eq!(scan(Vec2::ZERO, 160.0, &targets), Some(3));
    }

    #[test]
    fn scan_ignores_targets_out_of_range() {
        let targets = [target(1, 200.0, 0.0, false)];
        assert_eq!(scan(Vec2::ZERO, 160.0, &targets), None);
    }
}
