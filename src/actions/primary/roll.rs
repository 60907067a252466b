//! Roll: curl up while moving; friction and slopes act on ground speed.

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::kinds::{ActionKind, ActionProfile};
use crate::actions::primary::{approach, locked_out};
use crate::actions::state::{InputRestriction, SizeMode};
use crate::core::step::STEP_SECS;

const PROFILE: ActionProfile = ActionProfile::new(10, true, SizeMode::Shrunk);

#[derive(Default)]
pub struct Roll {
    /// Left the ground mid-roll; uncurl on landing unless down is held
    uncurl_armed: bool,
}

impl Action for Roll {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
            && !locked_out(view)
            && !matches!(
                view.current,
                Some(ActionKind::Jump | ActionKind::GlideSlide)
            )
            && view.state.ground_speed.abs() >= view.tuning.min_roll_speed
            && !view.input.horizontal_held()
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.down_held()
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.input_restriction = InputRestriction::LockHorizontal;
        ctx.state.size_mode = SizeMode::Shrunk;
        ctx.effects.sound("roll");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        let physics = ctx.physics();
        if !physics.grounded {
            self.uncurl_armed = true;
            return;
        }

        let tuning = ctx.tuning();
        let mut speed = ctx.state.ground_speed;
        let slope = physics.ground_angle.sin();
        if slope != 0.0 {
            let uphill = speed * slope > 0.0;
            let factor = if uphill {
                tuning.roll_slope_up
            } else {
                tuning.roll_slope_down
            };
            speed -= factor * slope * STEP_SECS;
        }

        let mut decel = tuning.roll_friction;
        if ctx.input().opposes(speed) {
            decel += tuning.roll_brake;
        }
        speed = approach(speed, 0.0, decel * STEP_SECS);
        ctx.state.set_ground_speed(speed, physics.ground_angle);
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        if !view.grounded() {
            return false;
        }
        view.state.ground_speed.abs() < view.tuning.roll_stop_speed
            || (self.uncurl_armed && !view.input.down_held())
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.input_restriction = InputRestriction::Unrestricted;
        ctx.state.size_mode = SizeMode::Regular;
    }

    fn reset(&mut self) {
        self.uncurl_armed = false;
    }
}

impl PrimaryAction for Roll {
    fn kind(&self) -> ActionKind {
        ActionKind::Roll
    }
}
