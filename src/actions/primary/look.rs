//! Crouch and look up: hold a direction at rest; the camera pans after a
//! delay and returns when the pose ends.

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::effects::CameraRequest;
use crate::actions::kinds::{ActionKind, ActionProfile, TimerTag};
use crate::actions::primary::{charging, jumping, locked_out};
use crate::actions::state::{InputRestriction, SizeMode};
use crate::actions::timer::TimerHandle;

const PAN: TimerTag = TimerTag(0);

pub struct Look {
    kind: ActionKind,
    pan: Option<TimerHandle>,
    panned: bool,
}

impl Look {
    pub fn crouch() -> Self {
        Self::new(ActionKind::Crouch)
    }

    pub fn up() -> Self {
        Self::new(ActionKind::LookUp)
    }

    fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            pan: None,
            panned: false,
        }
    }

    fn is_crouch(&self) -> bool {
        self.kind == ActionKind::Crouch
    }

    fn holding(&self, view: &ActionView<'_>) -> bool {
        if self.is_crouch() {
            view.input.down_held()
        } else {
            view.input.up_held()
        }
    }
}

impl Action for Look {
    fn profile(&self) -> ActionProfile {
        if self.is_crouch() {
            ActionProfile::new(13, false, SizeMode::Crouched)
        } else {
            ActionProfile::new(14, false, SizeMode::Regular)
        }
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
            && !locked_out(view)
            && !charging(view)
            && !jumping(view)
            && view.at_rest()
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        self.holding(view)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.input_restriction = InputRestriction::LockHorizontal;
        if self.is_crouch() {
            ctx.state.size_mode = SizeMode::Crouched;
        }
        let delay = ctx.tuning().look_pan_delay_steps;
        self.pan = Some(ctx.schedule(delay, PAN));
    }

    fn on_perform(&mut self, _ctx: &mut ActionContext<'_>) {}

    fn on_timer(&mut self, tag: TimerTag, ctx: &mut ActionContext<'_>) {
        if tag != PAN {
            return;
        }
        self.pan = None;
        self.panned = true;
        let tuning = ctx.tuning();
        let offset_y = if self.is_crouch() {
            tuning.look_down_offset
        } else {
            tuning.look_up_offset
        };
        ctx.effects.camera(CameraRequest::Pan { offset_y });
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        !self.holding(view) || !view.grounded() || !view.at_rest()
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.pan);
        if self.panned {
            ctx.effects.camera(CameraRequest::Pan { offset_y: 0.0 });
        }
        ctx.state.input_restriction = InputRestriction::Unrestricted;
        if self.is_crouch() {
            ctx.state.size_mode = SizeMode::Regular;
        }
    }

    fn reset(&mut self) {
        self.pan = None;
        self.panned = false;
    }
}

impl PrimaryAction for Look {
    fn kind(&self) -> ActionKind {
        self.kind
    }
}
