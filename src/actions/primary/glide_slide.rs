//! Belly slide after a glide touches down. Only reachable through the
//! glide's landing hand-off.

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::kinds::{ActionKind, ActionProfile};
use crate::actions::primary::approach;
use crate::actions::state::{InputRestriction, SizeMode};
use crate::core::step::STEP_SECS;

const PROFILE: ActionProfile = ActionProfile::new(9, true, SizeMode::Gliding);

#[derive(Default)]
pub struct GlideSlide;

impl Action for GlideSlide {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, _view: &ActionView<'_>) -> bool {
        false
    }

    fn launch_condition(&self, _view: &ActionView<'_>) -> bool {
        false
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.size_mode = SizeMode::Gliding;
        ctx.state.input_restriction = InputRestriction::LockAll;
        ctx.effects.sound("glide_land");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        let friction = ctx.tuning().glide_slide_friction * STEP_SECS;
        let speed = approach(ctx.state.ground_speed, 0.0, friction);
        ctx.state.set_ground_speed(speed, ctx.physics().ground_angle);
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        !view.grounded() || view.at_rest() || !view.input.jump.held
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.size_mode = SizeMode::Regular;
        ctx.state.input_restriction = InputRestriction::Unrestricted;
    }

    fn reset(&mut self) {}
}

impl PrimaryAction for GlideSlide {
    fn kind(&self) -> ActionKind {
        ActionKind::GlideSlide
    }
}
