//! Victory and death: actions that end a run of play and lock out every
//! other move until they finish.

use bevy::prelude::*;

use crate::actions::contract::{Action, ActionContext, ActionView, PrimaryAction};
use crate::actions::effects::CameraRequest;
use crate::actions::kinds::{ActionKind, ActionProfile, TimerTag};
use crate::actions::primary::approach;
use crate::actions::primary::hurt::{protected, takes_damage};
use crate::actions::state::{InputRestriction, SizeMode};
use crate::actions::timer::TimerHandle;
use crate::core::step::STEP_SECS;

const VICTORY: ActionProfile = ActionProfile::new(1, false, SizeMode::Regular);
const DIE: ActionProfile = ActionProfile::new(2, false, SizeMode::Regular);
const RESPAWN: TimerTag = TimerTag(0);

#[derive(Default)]
pub struct Victory;

impl Action for Victory {
    fn profile(&self) -> ActionProfile {
        VICTORY
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        view.world.goal_reached && view.grounded() && !view.is_current(ActionKind::Die)
    }

    fn launch_condition(&self, _view: &ActionView<'_>) -> bool {
        true
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.input_restriction = InputRestriction::LockAll;
        ctx.effects.camera(CameraRequest::Freeze);
        ctx.effects.sound("victory");
    }

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>) {
        let decel = ctx.tuning().victory_decel * STEP_SECS;
        let speed = approach(ctx.state.ground_speed, 0.0, decel);
        ctx.state.set_ground_speed(speed, ctx.physics().ground_angle);
    }

    fn exit_condition(&self, view: &ActionView<'_>) -> bool {
        !view.world.goal_reached
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.state.input_restriction = InputRestriction::Unrestricted;
        ctx.effects.camera(CameraRequest::Follow);
    }

    fn reset(&mut self) {}
}

impl PrimaryAction for Victory {
    fn kind(&self) -> ActionKind {
        ActionKind::Victory
    }
}

#[derive(Default)]
pub struct Die {
    respawn: Option<TimerHandle>,
    finished: bool,
}

impl Action for Die {
    fn profile(&self) -> ActionProfile {
        DIE
    }

    fn can_perform(&self, view: &ActionView<'_>) -> bool {
        if view.is_current(ActionKind::Victory) {
            return false;
        }
        if view.world.lethal_hazard {
            return true;
        }
        // Knockback already covers the contact that caused it.
        !view.is_current(ActionKind::Hurt) && takes_damage(view) && !protected(view)
    }

    fn launch_condition(&self, _view: &ActionView<'_>) -> bool {
        true
    }

    fn on_start(&mut self, ctx: &mut ActionContext<'_>) {
        let tuning = ctx.tuning();
        ctx.state.input_restriction = InputRestriction::LockAll;
        ctx.state.size_mode = SizeMode::Regular;
        ctx.state.velocity = Vec2::new(0.0, tuning.death_hop_speed);
        ctx.state.shield = None;
        ctx.state.super_form = false;
        self.respawn = Some(ctx.schedule(tuning.respawn_delay_steps, RESPAWN));
        ctx.effects.camera(CameraRequest::Freeze);
        ctx.effects.sound("death");
        info!("entity died at step {}", ctx.step());
    }

    fn on_perform(&mut self, _ctx: &mut ActionContext<'_>) {}

    fn on_timer(&mut self, tag: TimerTag, _ctx: &mut ActionContext<'_>) {
        if tag == RESPAWN {
            self.respawn = None;
            self.finished = true;
        }
    }

    fn exit_condition(&self, _view: &ActionView<'_>) -> bool {
        self.finished
    }

    fn on_end(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.cancel(&mut self.respawn);
        ctx.state.input_restriction = InputRestriction::Unrestricted;
        ctx.state.velocity = Vec2::ZERO;
        ctx.state.ground_speed = 0.0;
        ctx.state.rings = 0;
        ctx.effects.camera(CameraRequest::Follow);
    }

    fn reset(&mut self) {
        self.respawn = None;
        self.finished = false;
    }
}

impl PrimaryAction for Die {
    fn kind(&self) -> ActionKind {
        ActionKind::Die
    }
}
