//! Shield abilities triggered by a second jump press.

use bevy::prelude::*;

use crate::actions::contract::{Action, ActionContext, ActionView, SubAction};
use crate::actions::kinds::{ActionProfile, ExitReason, SubActionKind, TimerTag};
use crate::actions::state::{ShieldKind, SizeMode};
use crate::actions::sub::{air_press, elemental_shield};
use crate::actions::timer::TimerHandle;

const INSTA_SHIELD: ActionProfile = ActionProfile::new(24, true, SizeMode::Expanded);
const FIRE_DASH: ActionProfile = ActionProfile::new(21, true, SizeMode::Shrunk);
const BUBBLE_BOUNCE: ActionProfile = ActionProfile::new(22, true, SizeMode::Shrunk);
const THUNDER_JUMP: ActionProfile = ActionProfile::new(23, true, SizeMode::Shrunk);
const EXPIRED: TimerTag = TimerTag(0);

/// Brief hitbox burst for a shieldless entity.
#[derive(Default)]
pub struct InstaShield {
    expiry: Option<TimerHandle>,
    expired: bool,
    saved_size: SizeMode,
}

impl Action for InstaShield {
    fn profile(&self) -> ActionProfile {
        INSTA_SHIELD
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.state.shield.is_none() && !view.state.super_form
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        air_press(view)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        self.saved_size = ctx.state.size_mode;
        ctx.state.size_mode = SizeMode::Expanded;
        let steps = ctx.tuning().insta_shield_steps;
        self.expiry = Some(ctx.schedule(steps, EXPIRED));
        ctx.effects.sound("insta_shield");
    }

    fn on_perform(&mut self, _ctx: &mut ActionContext<'_>) {}

    fn on_timer(&mut self, tag: TimerTag, _ctx: &mut ActionContext<'_>) {
        if tag == EXPIRED {
            self.expiry = None;
            self.expired = true;
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        self.expired || view.grounded()
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.expiry);
        ctx.state.size_mode = self.saved_size;
    }

    fn reset(&mut self) {
        self.expiry = None;
        self.expired = false;
        self.saved_size = SizeMode::default();
    }
}

impl SubAction for InstaShield {
    fn kind(&self) -> SubActionKind {
        SubActionKind::InstaShield
    }
}

/// Horizontal fireball dash with gravity suspended.
#[derive(Default)]
pub struct FireDash {
    burn: Option<TimerHandle>,
    spent: bool,
    saved_gravity: f32,
}

impl Action for FireDash {
    fn profile(&self) -> ActionProfile {
        FIRE_DASH
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        elemental_shield(view) == Some(ShieldKind::Fire)
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        air_press(view)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        let tuning = ctx.tuning();
        self.saved_gravity = ctx.state.gravity_scale;
        ctx.state.gravity_scale = 0.0;
        ctx.state.velocity = Vec2::new(ctx.state.facing.sign() * tuning.fire_dash_speed, 0.0);
        self.burn = Some(ctx.schedule(tuning.fire_dash_steps, EXPIRED));
        ctx.effects.sound("fire_dash");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.velocity.y = 0.0;
    }

    fn on_timer(&mut self, tag: TimerTag, _ctx: &mut ActionContext<'_>) {
        if tag == EXPIRED {
            self.burn = None;
            self.spent = true;
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        self.spent || view.grounded() || view.physics.wall_ahead(view.state.facing)
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.burn);
        ctx.state.gravity_scale = self.saved_gravity;
    }

    fn reset(&mut self) {
        self.burn = None;
        self.spent = false;
        self.saved_gravity = 0.0;
    }
}

impl SubAction for FireDash {
    fn kind(&self) -> SubActionKind {
        SubActionKind::FireDash
    }
}

/// Slam downward and bounce off the ground. Keeps the jump alive through
/// the landing and frees the jump for another bounce.
#[derive(Default)]
pub struct BubbleBounce;

impl Action for BubbleBounce {
    fn profile(&self) -> ActionProfile {
        BUBBLE_BOUNCE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        elemental_shield(view) == Some(ShieldKind::Bubble)
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        air_press(view)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        let drop = ctx.tuning().bubble_drop_speed;
        ctx.state.velocity = Vec2::new(0.0, -drop);
        ctx.effects.sound("bubble_drop");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.velocity.x = 0.0;
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        if ctx.exit_reason() != Some(ExitReason::Natural) {
            return;
        }
        ctx.state.velocity.y = ctx.tuning().bubble_bounce_speed;
        ctx.effects.sound("bubble_bounce");
        ctx.release_parent();
    }

    fn reset(&mut self) {}
}

impl SubAction for BubbleBounce {
    fn kind(&self) -> SubActionKind {
        SubActionKind::BubbleBounce
    }

    fn holds_parent(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
    }
}

/// Second, weaker jump in mid-air.
#[derive(Default)]
pub struct ThunderJump;

impl Action for ThunderJump {
    fn profile(&self) -> ActionProfile {
        THUNDER_JUMP
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        elemental_shield(view) == Some(ShieldKind::Lightning)
    }

    fn launch_condition(&self, view: &ActionView<'_>) -> bool {
        air_press(view)
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.velocity.y = ctx.tuning().thunder_jump_speed;
        ctx.effects.sound("thunder_jump");
    }

    fn on_perform(&mut self, _ctx: &mut ActionContext<'_>) {}

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        view.grounded() || view.state.velocity.y <= 0.0
    }

    fn on_end(&mut self, _ctx: &mut ActionContext<'_>) {}

    fn reset(&mut self) {}
}

impl SubAction for ThunderJump {
    fn kind(&self) -> SubActionKind {
        SubActionKind::ThunderJump
    }
}
