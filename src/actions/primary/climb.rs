//! Wall climbing, entered by gliding into a wall, and the pull-up over
//! its top edge.

use bevy::prelude::*;

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::kinds::{ActionKind, ActionProfile, ExitReason, SubActionKind, TimerTag};
use crate::actions::state::{InputRestriction, SizeMode};
use crate::actions::timer::TimerHandle;

const CLIMB: ActionProfile = ActionProfile::new(8, false, SizeMode::Regular);
const LEDGE_CLIMB: ActionProfile = ActionProfile::new(7, false, SizeMode::Regular);
const PULLED_UP: TimerTag = TimerTag(0);

#[derive(Default)]
pub struct Climb;

impl Action for Climb {
    fn profile(&self) -> ActionProfile {
        CLIMB
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        !view.grounded()
            && view.is_current_sub(SubActionKind::Glide)
            && view.physics.wall_ahead(view.state.facing)
    }

    fn launch_condition(&self, _view: &ActionView<'_>) -> bool {
        true
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.gravity_scale = 0.0;
        ctx.state.velocity = Vec2::ZERO;
        ctx.state.input_restriction = InputRestriction::LockAll;
        ctx.effects.sound("grab");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        let climb = if ctx.input().up_held() {
            1.0
        } else if ctx.input().down_held() {
            -1.0
        } else {
            0.0
        };
        ctx.state.velocity = Vec2::new(0.0, climb * ctx.tuning().climb_speed);
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.jump.pressed || view.grounded() || view.physics.wall.is_none()
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.gravity_scale = 1.0;
        ctx.state.input_restriction = InputRestriction::Unrestricted;

        if ctx.exit_reason() == Some(ExitReason::Natural) && ctx.input().jump.pressed {
            let away = ctx.state.facing.flipped();
            ctx.state.facing = away;
            ctx.state.velocity = Vec2::new(away.sign() * ctx.tuning().wall_jump_speed, 0.0);
            ctx.hand_off(ActionKind::Jump);
        }
    }

    fn reset(&mut self) {}
}

impl PrimaryAction for Climb {
    fn kind(&self) -> ActionKind {
        ActionKind::Climb
    }
}

#[derive(Default)]
pub struct LedgeClimb {
    pull: Option<TimerHandle>,
    started_at: u64,
    done: bool,
}

impl Action for LedgeClimb {
    fn profile(&self) -> ActionProfile {
        LEDGE_CLIMB
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.is_current(ActionKind::Climb) && view.physics.wall.is_some_and(|wall| wall.ledge_top)
    }

    fn launch_condition(&self, _view: &ActionView<'_>) -> bool {
        true
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.gravity_scale = 0.0;
        ctx.state.velocity = Vec2::ZERO;
        ctx.state.input_restriction = InputRestriction::LockAll;
        self.started_at = ctx.step();
        let steps = ctx.tuning().ledge_climb_steps;
        self.pull = Some(ctx.schedule(steps, PULLED_UP));
        ctx.effects.play("ledge_climb", 0.0);
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        let steps = ctx.tuning().ledge_climb_steps.max(1) as f32;
        let elapsed = (ctx.step() - self.started_at) as f32;
        ctx.state.velocity = Vec2::ZERO;
        ctx.effects.play("ledge_climb", elapsed / steps);
    }

    fn on_timer(&mut self, tag: TimerTag, _ctx: &mut ActionContext<'_>) {
        if tag == PULLED_UP {
            self.pull = None;
            self.done = true;
        }
    }

    fn exit_condition(&self, _view: &ActionView<'_>) -> bool {
        self.done
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.pull);
        ctx.state.gravity_scale = 1.0;
        ctx.state.input_restriction = InputRestriction::Unrestricted;
        if ctx.exit_reason() == Some(ExitReason::Natural) {
            let pop = ctx.tuning().ledge_pop_speed;
            ctx.state.velocity = Vec2::new(ctx.state.facing.sign() * pop, pop);
        }
    }

    fn reset(&mut self) {
        self.pull = None;
        self.started_at = 0;
        self.done = false;
    }
}

impl PrimaryAction for LedgeClimb {
    fn kind(&self) -> ActionKind {
        ActionKind::LedgeClimb
    }
}
