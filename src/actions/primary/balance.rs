//! Balance: teetering on a ledge with one foot sensor off the edge.

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::effects::AnimParam;
use crate::actions::kinds::{ActionKind, ActionProfile};
use crate::actions::state::SizeMode;

const PROFILE: ActionProfile = ActionProfile::new(15, false, SizeMode::Regular);

#[derive(Default)]
pub struct Balance;

impl Action for Balance {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.current.is_none()
            && view.physics.on_ledge()
            && view.at_rest()
            && !view.input.horizontal_held()
    }

    fn launch_condition(&self, _view: &ActionView<'_>) -> bool {
        true
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.effects.set_int(AnimParam::Substate, 1);
    }

    fn on_perform(&mut self, _ctx: &mut ActionContext<'_>) {}

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        !view.physics.on_ledge() || !view.at_rest() || view.input.horizontal_held()
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.effects.set_int(AnimParam::Substate, 0);
    }

    fn reset(&mut self) {}
}

impl PrimaryAction for Balance {
    fn kind(&self) -> ActionKind {
        ActionKind::Balance
    }
}
