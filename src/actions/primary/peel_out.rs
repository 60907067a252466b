//! Super peel-out: charge in place while looking up, release at full
//! speed once the charge timer has fired.

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::effects::{AnimParam, CameraRequest};
use crate::actions::kinds::{ActionKind, ActionProfile, ExitReason, TimerTag};
use crate::actions::primary::{jumping, locked_out};
use crate::actions::state::{InputRestriction, SizeMode};
use crate::actions::timer::TimerHandle;

const PROFILE: ActionProfile = ActionProfile::new(5, false, SizeMode::Regular);
const CHARGED: TimerTag = TimerTag(0);

#[derive(Default)]
pub struct SuperPeelOut {
    charge: Option<TimerHandle>,
    charged: bool,
}

impl Action for SuperPeelOut {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
            && !locked_out(view)
            && !jumping(view)
            && view.at_rest()
            && view.input.up_held()
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.jump.pressed
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.input_restriction = InputRestriction::LockHorizontal;
        let steps = ctx.tuning().peel_out_charge_steps;
        self.charge = Some(ctx.schedule(steps, CHARGED));
        ctx.effects.sound("peel_out_charge");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.set_ground_speed(0.0, ctx.physics().ground_angle);
    }

    fn on_timer(&mut self, tag: TimerTag, ctx: &mut ActionContext<'_>) {
        if tag == CHARGED {
            self.charge = None;
            self.charged = true;
            ctx.effects.set_bool(AnimParam::Charged, true);
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        !view.input.up_held() || !view.grounded()
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.charge);
        ctx.state.input_restriction = InputRestriction::Unrestricted;
        ctx.effects.set_bool(AnimParam::Charged, false);

        let physics = ctx.physics();
        if !self.charged || ctx.exit_reason() != Some(ExitReason::Natural) || !physics.grounded {
            return;
        }
        let tuning = ctx.tuning();
        let speed = tuning.peel_out_speed * ctx.state.facing.sign();
        ctx.state.set_ground_speed(speed, physics.ground_angle);
        ctx.effects.camera(CameraRequest::Lag {
            steps: tuning.spindash_camera_lag_steps,
        });
        ctx.effects.sound("peel_out_release");
    }

    fn reset(&mut self) {
        self.charge = None;
        self.charged = false;
    }
}

impl PrimaryAction for SuperPeelOut {
    fn kind(&self) -> ActionKind {
        ActionKind::SuperPeelOut
    }
}
