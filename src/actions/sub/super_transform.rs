//! Super transformation: freeze in mid-air, then come out in super form.

use bevy::prelude::*;

use crate::actions::contract::{Action, ActionContext, ActionView, SubAction};
use crate::actions::effects::CameraRequest;
use crate::actions::kinds::{ActionProfile, ExitReason, SubActionKind, TimerTag};
use crate::actions::snapshot::Button;
use crate::actions::state::{InputRestriction, SizeMode};
use crate::actions::timer::TimerHandle;

const PROFILE: ActionProfile = ActionProfile::new(20, false, SizeMode::Regular);
const TRANSFORMED: TimerTag = TimerTag(0);

#[derive(Default)]
pub struct SuperTransform {
    transform: Option<TimerHandle>,
    finished: bool,
    saved_gravity: f32,
    saved_input: InputRestriction,
}

impl Action for SuperTransform {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        let tuning = view.tuning;
        !view.grounded()
            && !view.state.super_form
            && view.state.rings >= tuning.super_ring_cost
            && view.state.emeralds >= tuning.super_emeralds
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.pressed(Button::Jump) || view.input.pressed(Button::Special)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        self.saved_gravity = ctx.state.gravity_scale;
        self.saved_input = ctx.state.input_restriction;
        ctx.state.gravity_scale = 0.0;
        ctx.state.velocity = Vec2::ZERO;
        ctx.state.input_restriction = InputRestriction::LockAll;
        let steps = ctx.tuning().super_transform_steps;
        self.transform = Some(ctx.schedule(steps, TRANSFORMED));
        ctx.effects.camera(CameraRequest::Freeze);
        ctx.effects.sound("transform");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.velocity = Vec2::ZERO;
    }

    fn on_timer(&mut self, tag: TimerTag, _ctx: &mut ActionContext<'_>) {
        if tag == TRANSFORMED {
            self.transform = None;
            self.finished = true;
        }
    }

    fn exit_condition(&self, _view: &ActionView<'_>) -> bool {
        self.finished
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.transform);
        ctx.state.gravity_scale = self.saved_gravity;
        ctx.state.input_restriction = self.saved_input;
        ctx.effects.camera(CameraRequest::Follow);
        if ctx.exit_reason() == Some(ExitReason::Natural) {
            ctx.state.super_form = true;
            info!("super form at step {}", ctx.step());
        }
    }

    fn reset(&mut self) {
        self.transform = None;
        self.finished = false;
        self.saved_gravity = 0.0;
        self.saved_input = InputRestriction::Unrestricted;
    }
}

impl SubAction for SuperTransform {
    fn kind(&self) -> SubActionKind {
        SubActionKind::SuperTransform
    }
}
