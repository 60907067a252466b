//! Glide: a slow descent that gains horizontal speed, with turnarounds
//! that keep momentum and can be reversed mid-turn.
//!
//! Phases: `Gliding` -> `Turning` -> `Gliding`, or `Dropping` once jump is
//! let go. A short grace timer after every turn decision ignores further
//! reversal requests so a quick double tap does not fight the turn.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::actions::contract::{Action, ActionContext, ActionView, SubAction};
use crate::actions::effects::AnimParam;
use crate::actions::kinds::{ActionKind, ActionProfile, SubActionKind, TimerTag};
use crate::actions::state::{Facing, InputRestriction, SizeMode};
use crate::actions::sub::air_press;
use crate::actions::timer::TimerHandle;
use crate::core::step::STEP_SECS;

const PROFILE: ActionProfile = ActionProfile::new(27, true, SizeMode::Gliding);
const GRACE: TimerTag = TimerTag(0);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GlidePhase {
    #[default]
    Gliding,
    /// Swinging from `from` toward the opposite side
    Turning { from: Facing, elapsed: u32 },
    Dropping,
}

impl GlidePhase {
    fn substate(self) -> i32 {
        match self {
            GlidePhase::Gliding => 0,
            GlidePhase::Turning { .. } => 1,
            GlidePhase::Dropping => 2,
        }
    }
}

#[derive(Default)]
pub struct Glide {
    phase: GlidePhase,
    /// Horizontal speed magnitude, preserved through turns
    speed: f32,
    grace: Option<TimerHandle>,
    saved_gravity: f32,
    saved_size: SizeMode,
    saved_input: InputRestriction,
}

impl Glide {
    pub fn phase(&self) -> GlidePhase {
        self.phase
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    fn enter(&mut self, phase: GlidePhase, ctx: &mut ActionContext<'_>) {
        self.phase = phase;
        ctx.effects.set_int(AnimParam::Substate, phase.substate());
    }

    fn start_grace(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.grace);
        let steps = ctx.tuning().glide_turn_grace_steps;
        self.grace = Some(ctx.schedule(steps, GRACE));
    }

    fn let_go(&mut self, ctx: &mut ActionContext<'_>) {
        let keep = ctx.tuning().glide_drop_keep;
        ctx.state.velocity.x *= keep;
        ctx.state.gravity_scale = self.saved_gravity;
        ctx.state.size_mode = SizeMode::Shrunk;
        self.enter(GlidePhase::Dropping, ctx);
    }

    fn glide(&mut self, ctx: &mut ActionContext<'_>) {
        let tuning = ctx.tuning();
        self.speed = (self.speed + tuning.glide_accel * STEP_SECS).min(tuning.glide_max_speed);
        let facing = ctx.state.facing;
        ctx.state.velocity = Vec2::new(facing.sign() * self.speed, -tuning.glide_sink_speed);

        if self.grace.is_none() && ctx.input().opposes(facing.sign()) {
            self.enter(GlidePhase::Turning { from: facing, elapsed: 0 }, ctx);
            self.start_grace(ctx);
        }
    }

    fn turn(&mut self, from: Facing, elapsed: u32, ctx: &mut ActionContext<'_>) {
        let tuning = ctx.tuning();
        let steps = tuning.glide_turn_steps.max(1);
        let toward = from.flipped();

        // Pressing back toward the starting side swings back from where
        // the turn currently is.
        if self.grace.is_none() && ctx.input().opposes(toward.sign()) {
            let resumed = GlidePhase::Turning {
                from: toward,
                elapsed: steps.saturating_sub(elapsed),
            };
            self.enter(resumed, ctx);
            self.start_grace(ctx);
            return;
        }

        let elapsed = elapsed + 1;
        let t = (elapsed as f32 / steps as f32).min(1.0);
        ctx.state.velocity = Vec2::new(
            from.sign() * self.speed * (PI * t).cos(),
            -tuning.glide_sink_speed,
        );

        if elapsed >= steps {
            ctx.state.facing = toward;
            self.enter(GlidePhase::Gliding, ctx);
        } else {
            self.phase = GlidePhase::Turning { from, elapsed };
        }
    }
}

impl Action for Glide {
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
        self.saved_gravity = ctx.state.gravity_scale;
        self.saved_size = ctx.state.size_mode;
        self.saved_input = ctx.state.input_restriction;

        let tuning = ctx.tuning();
        self.speed = ctx.state.velocity.x.abs().max(tuning.glide_start_speed);
        ctx.state.gravity_scale = 0.0;
        ctx.state.size_mode = SizeMode::Gliding;
        ctx.state.input_restriction = InputRestriction::LockAll;
        ctx.state.velocity = Vec2::new(
            ctx.state.facing.sign() * self.speed,
            -tuning.glide_sink_speed,
        );
        self.enter(GlidePhase::Gliding, ctx);
        ctx.effects.sound("glide");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        if self.phase != GlidePhase::Dropping && !ctx.input().jump.held {
            self.let_go(ctx);
            return;
        }
        match self.phase {
            GlidePhase::Gliding => self.glide(ctx),
            GlidePhase::Turning { from, elapsed } => self.turn(from, elapsed, ctx),
            GlidePhase::Dropping => {}
        }
    }

    fn on_timer(&mut self, tag: TimerTag, _ctx: &mut ActionContext<'_>) {
        if tag == GRACE {
            self.grace = None;
        }
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        view.grounded()
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.grace);
        ctx.state.gravity_scale = self.saved_gravity;
        ctx.state.size_mode = self.saved_size;
        ctx.state.input_restriction = self.saved_input;
        ctx.effects.set_int(AnimParam::Substate, 0);

        let landed_gliding = ctx.physics().grounded && self.phase != GlidePhase::Dropping;
        if landed_gliding {
            let direction = match self.phase {
                GlidePhase::Turning { from, .. } => from,
                _ => ctx.state.facing,
            };
            let slide = direction.sign() * self.speed;
            ctx.state.set_ground_speed(slide, ctx.physics().ground_angle);
            ctx.hand_off(ActionKind::GlideSlide);
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SubAction for Glide {
    fn kind(&self) -> SubActionKind {
        SubActionKind::Glide
    }
}
