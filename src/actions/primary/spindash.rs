//! Spindash: rev up while crouched, release into a roll.

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::effects::{AnimParam, CameraRequest};
use crate::actions::kinds::{ActionKind, ActionProfile, ExitReason};
use crate::actions::primary::{jumping, locked_out};
use crate::actions::state::{InputRestriction, SizeMode};

const PROFILE: ActionProfile = ActionProfile::new(4, true, SizeMode::Shrunk);

#[derive(Default)]
pub struct Spindash {
    rev: f32,
}

impl Spindash {
    pub fn rev(&self) -> f32 {
        self.rev
    }
}

impl Action for Spindash {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
            && !locked_out(view)
            && !jumping(view)
            && view.at_rest()
            && view.input.down_held()
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.jump.pressed
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        self.rev = 0.0;
        ctx.state.input_restriction = InputRestriction::LockHorizontal;
        ctx.state.size_mode = SizeMode::Shrunk;
        ctx.effects.set_bool(AnimParam::Charged, true);
        ctx.effects.sound("spindash_charge");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        let tuning = ctx.tuning();
        if ctx.input().jump.pressed {
            self.rev = (self.rev + tuning.spindash_rev_step).min(tuning.spindash_max_rev);
            ctx.effects.sound("spindash_charge");
        } else {
            self.rev -= self.rev * tuning.spindash_rev_decay;
        }
        ctx.state.set_ground_speed(0.0, ctx.physics().ground_angle);
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        !view.input.down_held() || !view.grounded()
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.input_restriction = InputRestriction::Unrestricted;
        ctx.state.size_mode = SizeMode::Regular;
        ctx.effects.set_bool(AnimParam::Charged, false);

        let physics = ctx.physics();
        if ctx.exit_reason() != Some(ExitReason::Natural) || !physics.grounded {
            return;
        }
        let tuning = ctx.tuning();
        let speed = (self.rev / 2.0 + tuning.min_spindash_rev) * ctx.state.facing.sign();
        ctx.state.set_ground_speed(speed, physics.ground_angle);
        ctx.effects.camera(CameraRequest::Lag {
            steps: tuning.spindash_camera_lag_steps,
        });
        ctx.effects.sound("spindash_release");
        ctx.hand_off(ActionKind::Roll);
    }

    fn reset(&mut self) {
        self.rev = 0.0;
    }
}

impl PrimaryAction for Spindash {
    fn kind(&self) -> ActionKind {
        ActionKind::Spindash
    }
}
