//! Jump: leaves the ground along the surface normal and hosts the
//! airborne sub-actions.

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::kinds::{ActionKind, ActionProfile};
use crate::actions::primary::locked_out;
use crate::actions::state::{InputRestriction, SizeMode};
use crate::actions::sub_slot::SubActionSlot;

const PROFILE: ActionProfile = ActionProfile::new(6, true, SizeMode::Shrunk);

pub struct Jump {
    sub_actions: SubActionSlot,
    released: bool,
    /// Launched out of a roll: horizontal control stays locked
    from_roll: bool,
}

impl Jump {
    pub fn new(sub_actions: SubActionSlot) -> Self {
        Self {
            sub_actions,
            released: false,
            from_roll: false,
        }
    }
}

impl Action for Jump {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
            && !locked_out(view)
            && !matches!(
                view.current,
                Some(
                    ActionKind::Crouch
                        | ActionKind::Spindash
                        | ActionKind::SuperPeelOut
                        | ActionKind::LedgeClimb
                )
            )
            && !view.physics.low_ceiling(view.tuning.min_jump_clearance)
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        view.input.jump.pressed
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        let angle = ctx.physics().ground_angle;
        let speed = ctx.tuning().jump_speed;
        ctx.state.velocity.x -= speed * angle.sin();
        ctx.state.velocity.y += speed * angle.cos();
        ctx.state.size_mode = SizeMode::Shrunk;

        self.from_roll = ctx.replaced() == Some(ActionKind::Roll);
        if self.from_roll {
            ctx.state.input_restriction = InputRestriction::LockHorizontal;
        }
        ctx.effects.sound("jump");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        if self.released || ctx.input().jump.held {
            return;
        }
        self.released = true;
        let cap = ctx.tuning().jump_release_speed;
        if ctx.state.velocity.y > cap {
            ctx.state.velocity.y = cap;
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        view.grounded() && view.state.velocity.y <= 0.0 && !self.sub_actions.holds_parent(view)
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.size_mode = SizeMode::Regular;
        if self.from_roll {
            ctx.state.input_restriction = InputRestriction::Unrestricted;
        }
    }

    fn reset(&mut self) {
        self.released = false;
        self.from_roll = false;
    }
}

impl PrimaryAction for Jump {
    fn kind(&self) -> ActionKind {
        ActionKind::Jump
    }

    fn sub_actions(&self) -> Option<&SubActionSlot> {
        Some(&self.sub_actions)
    }

    fn sub_actions_mut(&mut self) -> Option<&mut SubActionSlot> {
        Some(&mut self.sub_actions)
    }
}
