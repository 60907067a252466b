//! Hurt: knockback after taking a survivable hit.

use bevy::prelude::*;

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::effects::AnimParam;
use crate::actions::kinds::{ActionKind, ActionProfile, TimerTag};
use crate::actions::primary::locked_out;
use crate::actions::state::{InputRestriction, SizeMode};
use crate::actions::timer::TimerHandle;

const PROFILE: ActionProfile = ActionProfile::new(3, false, SizeMode::Regular);
const FLICKER: TimerTag = TimerTag(0);

#[derive(Default)]
pub struct Hurt {
    flicker: Option<TimerHandle>,
    hidden: bool,
    left_ground: bool,
}

/// Pending damage that the entity will not shrug off.
pub(crate) fn takes_damage(view: &ActionView<'_>) -> bool {
    view.world.damage.is_some() && !view.state.is_invulnerable()
}

/// Rings or a shield absorb the hit.
pub(crate) fn protected(view: &ActionView<'_>) -> bool {
    view.state.rings > 0 || view.state.shield.is_some()
}

impl Action for Hurt {
    fn profile(&self) -> ActionProfile {
        PROFILE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        !locked_out(view) && !view.world.lethal_hazard && takes_damage(view) && protected(view)
    }

    fn launch_condition(&self, _view: &ActionView<'_>) -> bool {
        true
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        let tuning = ctx.tuning();
        let position = ctx.physics().position;
        let away = match ctx.world().damage {
            Some(contact) if contact.source_x != position.x => (position.x - contact.source_x).signum(),
            _ => -ctx.state.facing.sign(),
        };
        ctx.state.velocity = Vec2::new(away * tuning.hurt_knockback_x, tuning.hurt_knockback_y);
        ctx.state.input_restriction = InputRestriction::LockAll;
        ctx.state.size_mode = SizeMode::Regular;

        if ctx.state.shield.take().is_some() {
            ctx.effects.sound("shield_lost");
        } else {
            debug!("scattering {} rings", ctx.state.rings);
            ctx.state.rings = 0;
            ctx.effects.sound("ring_scatter");
        }
        self.flicker = Some(ctx.schedule_repeating(tuning.hurt_flicker_period_steps, FLICKER));
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        if !ctx.physics().grounded {
            self.left_ground = true;
        }
    }

    fn on_timer(&mut self, tag: TimerTag, ctx: &mut ActionContext<'_>) {
        if tag == FLICKER {
            self.hidden = !self.hidden;
            ctx.effects.set_bool(AnimParam::Visible, !self.hidden);
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        self.left_ground && view.grounded() && view.state.velocity.y <= 0.0
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.flicker);
        ctx.effects.set_bool(AnimParam::Visible, true);
        ctx.state.input_restriction = InputRestriction::Unrestricted;
        ctx.state.invulnerable_steps = ctx.tuning().hurt_invulnerable_steps;
        ctx.state.set_ground_speed(0.0, ctx.physics().ground_angle);
    }

    fn reset(&mut self) {
        self.flicker = None;
        self.hidden = false;
        self.left_ground = false;
    }
}

impl PrimaryAction for Hurt {
    fn kind(&self) -> ActionKind {
        ActionKind::Hurt
    }
}
