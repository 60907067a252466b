//! Skid: braking hard against the direction of travel.

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::kinds::{ActionKind, ActionProfile, TimerTag};
use crate::actions::primary::{approach, jumping, locked_out};
use crate::actions::state::{Facing, SizeMode};
use crate::actions::timer::TimerHandle;
use crate::core::step::STEP_SECS;

const PROFILE: ActionProfile = ActionProfile::new(11, false, SizeMode::Regular);
const DUST: TimerTag = TimerTag(0);

#[derive(Default)]
pub struct Skid {
    dust: Option<TimerHandle>,
}

impl Action for Skid {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
            && !locked_out(view)
            && !jumping(view)
            && view.state.input_restriction.allows_horizontal()
            && view.state.ground_speed.abs() >= view.tuning.skid_min_speed
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.opposes(view.state.ground_speed)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        let period = ctx.tuning().skid_dust_period_steps;
        self.dust = Some(ctx.schedule_repeating(period, DUST));
        ctx.effects.sound("skid");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        let decel = ctx.tuning().skid_decel * STEP_SECS;
        let speed = approach(ctx.state.ground_speed, 0.0, decel);
        ctx.state.set_ground_speed(speed, ctx.physics().ground_angle);
    }

    fn on_timer(&mut self, tag: TimerTag, ctx: &mut ActionContext<'_>) {
        if tag == DUST {
            ctx.effects.play("skid_dust", 0.0);
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        !view.grounded() || view.at_rest() || !view.input.opposes(view.state.ground_speed)
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.dust);
        // Turn around if the brake brought us to a stop.
        if let Some(facing) = Facing::from_sign(ctx.input().horizontal()) {
            if ctx.view().at_rest() {
                ctx.state.facing = facing;
            }
        }
    }

    fn reset(&mut self) {
        self.dust = None;
    }
}

impl PrimaryAction for Skid {
    fn kind(&self) -> ActionKind {
        ActionKind::Skid
    }
}
