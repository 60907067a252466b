//! Flight: reduced gravity with a burst of lift per jump press until the
//! flyer tires.

use crate::actions::contract::{Action, ActionContext, ActionView, SubAction};
use crate::actions::effects::AnimParam;
use crate::actions::kinds::{ActionProfile, SubActionKind, TimerTag};
use crate::actions::state::SizeMode;
use crate::actions::sub::air_press;
use crate::actions::timer::TimerHandle;

const PROFILE: ActionProfile = ActionProfile::new(28, false, SizeMode::Regular);
const TIRED: TimerTag = TimerTag(0);

#[derive(Default)]
pub struct Fly {
    fatigue: Option<TimerHandle>,
    tired: bool,
    saved_gravity: f32,
    saved_size: SizeMode,
}

impl Fly {
    pub fn is_tired(&self) -> bool {
        self.tired
    }
}

impl Action for Fly {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        !view.grounded()
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        air_press(view)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        let tuning = ctx.tuning();
        self.saved_gravity = ctx.state.gravity_scale;
        self.saved_size = ctx.state.size_mode;
        ctx.state.gravity_scale = tuning.fly_gravity_scale;
        ctx.state.size_mode = SizeMode::Regular;
        self.fatigue = Some(ctx.schedule(tuning.fly_duration_steps, TIRED));
        ctx.effects.sound("fly");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        if self.tired || !ctx.input().jump.pressed {
            return;
        }
        let tuning = ctx.tuning();
        ctx.state.velocity.y = (ctx.state.velocity.y + tuning.fly_thrust).min(tuning.fly_max_rise);
    }

    fn on_timer(&mut self, tag: TimerTag, ctx: &mut ActionContext<'_>) {
        if tag == TIRED {
            self.fatigue = None;
            self.tired = true;
            ctx.effects.set_bool(AnimParam::Tired, true);
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.fatigue);
        ctx.state.gravity_scale = self.saved_gravity;
        ctx.state.size_mode = self.saved_size;
        if self.tired {
            ctx.effects.set_bool(AnimParam::Tired, false);
        }
    }

    fn reset(&mut self) {
        self.fatigue = None;
        self.tired = false;
        self.saved_gravity = 0.0;
        self.saved_size = SizeMode::default();
    }
}

impl SubAction for Fly {
    fn kind(&self) -> SubActionKind {
        SubActionKind::Fly
    }
}
