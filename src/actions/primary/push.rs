//! Push: leaning into a wall at rest.

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::kinds::{ActionKind, ActionProfile};
use crate::actions::primary::{charging, jumping, locked_out};
use crate::actions::state::SizeMode;

const PROFILE: ActionProfile = ActionProfile::new(12, false, SizeMode::Regular);

#[derive(Default)]
pub struct Push;

fn pushing(view: &ActionView<'_>) -> bool {
    let facing = view.state.facing;
    view.physics.wall_ahead(facing) && view.input.horizontal() == facing.sign()
}

impl Action for Push {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
            && !locked_out(view)
            && !charging(view)
            && !jumping(view)
            && view.at_rest()
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        pushing(view)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.effects.play("push", 0.0);
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.set_ground_speed(0.0, ctx.physics().ground_angle);
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        !view.grounded() || !pushing(view)
    }

    fn on_end(&mut self, _ctx: &mut ActionContext<'_>) {}

    fn reset(&mut self) {}
}

impl PrimaryAction for Push {
    fn kind(&self) -> ActionKind {
        ActionKind::Push
    }
}
