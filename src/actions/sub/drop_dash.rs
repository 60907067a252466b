//! Drop dash: hold jump in mid-air to charge, land charged to shoot off
//! in a roll.

use crate::actions::contract::{Action, ActionContext, ActionView, SubAction};
use crate::actions::effects::{AnimParam, CameraRequest};
use crate::actions::kinds::{ActionKind, ActionProfile, SubActionKind, TimerTag};
use crate::actions::state::SizeMode;
use crate::actions::sub::{air_press, elemental_shield};
use crate::actions::timer::TimerHandle;

const PROFILE: ActionProfile = ActionProfile::new(26, true, SizeMode::Shrunk);
const CHARGED: TimerTag = TimerTag(0);

#[derive(Default)]
pub struct DropDash {
    charge: Option<TimerHandle>,
    charged: bool,
}

impl DropDash {
    /// Ground speed on release. Keeps part of the landing speed when it
    /// already points the way the entity faces.
    pub fn release_speed(ground_speed: f32, facing_sign: f32, dash: f32, max: f32) -> f32 {
        if ground_speed * facing_sign >= 0.0 {
            (ground_speed / 4.0 + facing_sign * dash).clamp(-max, max)
        } else {
            facing_sign * dash
        }
    }
}

impl Action for DropDash {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        elemental_shield(view).is_none()
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        air_press(view)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        let steps = ctx.tuning().drop_dash_charge_steps;
        self.charge = Some(ctx.schedule(steps, CHARGED));
    }

    fn on_perform(&mut self, _ctx: &mut ActionContext<'_>) {}

    fn on_timer(&mut self, tag: TimerTag, ctx: &mut ActionContext<'_>) {
        if tag == CHARGED {
            self.charge = None;
            self.charged = true;
            ctx.effects.set_bool(AnimParam::Charged, true);
            ctx.effects.sound("drop_dash_ready");
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        !view.input.jump.held
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.charge);
        ctx.effects.set_bool(AnimParam::Charged, false);

        let physics = ctx.physics();
        if !self.charged || !physics.grounded || !ctx.input().jump.held {
            return;
        }
        let tuning = ctx.tuning();
        let speed = Self::release_speed(
            ctx.state.ground_speed,
            ctx.state.facing.sign(),
            tuning.drop_dash_speed,
            tuning.drop_dash_max_speed,
        );
        ctx.state.set_ground_speed(speed, physics.ground_angle);
        ctx.effects.camera(CameraRequest::Lag {
            steps: tuning.spindash_camera_lag_steps,
        });
        ctx.effects.sound("drop_dash_release");
        ctx.hand_off(ActionKind::Roll);
    }

    fn reset(&mut self) {
        self.charge = None;
        self.charged = false;
    }
}

impl SubAction for DropDash {
    fn kind(&self) -> SubActionKind {
        SubActionKind::DropDash
    }
}

#[cfg(test)]
mod tests {
    use super::DropDash;

    #[test]
    fn release_keeps_momentum_in_facing_direction() {
        assert_eq!(DropDash::release_speed(400.0, 1.0, 480.0, 720.0), 580.0);
        assert_eq!(DropDash::release_speed(2000.0, 1.0, 480.0, 720.0), 720.0);
    }

    #[test]
    fn release_against_motion_resets_to_dash_speed() {
        assert_eq!(DropDash::release_speed(300.0, -1.0, 480.0, 720.0), -480.0);
    }
}
