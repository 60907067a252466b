//! Actions domain: the guard and lifecycle contract every variant implements.
//!
//! Per step the owning slot evaluates, in order:
//!
//! 1. [`Action::observe`] then [`Action::can_perform`] and
//!    [`Action::launch_condition`] for every registered action that is not
//!    current;
//! 2. [`Action::on_start`] for the one that launches;
//! 3. [`Action::exit_condition`] for the current action, followed by either
//!    [`Action::on_end`] + [`Action::reset`] or [`Action::on_perform`].
//!
//! Guards and exit conditions only receive an [`ActionView`], so they
//! cannot mutate anything. `observe` is the single place a variant may
//! refresh private data ahead of its guard (the homing target scan).

use crate::actions::effects::Effects;
use crate::actions::kinds::{
    ActionId, ActionKind, ActionProfile, ExitReason, SubActionKind, TimerEvent, TimerTag,
};
use crate::actions::snapshot::{InputSnapshot, PhysicsSnapshot, WorldSnapshot};
use crate::actions::state::CharacterState;
use crate::actions::sub_slot::SubActionSlot;
use crate::actions::timer::{TimerHandle, TimerTable};
use crate::actions::tuning::ActionTuning;

pub trait Action: Send + Sync + 'static {
    fn profile(&self) -> ActionProfile;

    /// Refresh variant-private data before the guard is polled. Called at
    /// most once per step, only while the action is not current.
    fn observe(&mut self, _view: &ActionView<'_>) {}

    /// Stateless eligibility predicate.
    fn can_perform(&self, view: &ActionView<'_>) -> bool;

    /// Edge-triggered predicate checked once `can_perform` holds.
    fn launch_condition(&self, view: &ActionView<'_>) -> bool;

    fn on_start(&mut self, ctx: &mut ActionContext<'_>);

    fn on_perform(&mut self, ctx: &mut ActionContext<'_>);

    fn exit_condition(&self, view: &ActionView<'_>) -> bool;

    /// Undo every shared mutation made in `on_start` and cancel every
    /// timer still pending.
    fn on_end(&mut self, ctx: &mut ActionContext<'_>);

    fn reset(&mut self);

    /// A timer scheduled by this action came due.
    fn on_timer(&mut self, _tag: TimerTag, _ctx: &mut ActionContext<'_>) {}
}

pub trait PrimaryAction: Action {
    fn kind(&self) -> ActionKind;

    fn sub_actions(&self) -> Option<&SubActionSlot> {
        None
    }

    fn sub_actions_mut(&mut self) -> Option<&mut SubActionSlot> {
        None
    }
}

pub trait SubAction: Action {
    fn kind(&self) -> SubActionKind;

    /// Keep the hosting primary from ending on this step's landing.
    fn holds_parent(&self, _view: &ActionView<'_>) -> bool {
        false
    }
}

/// Read-only inputs shared by every view and context of one step.
#[derive(Clone, Copy)]
pub(crate) struct StepEnv<'a> {
    pub physics: &'a PhysicsSnapshot,
    pub input: &'a InputSnapshot,
    pub world: &'a WorldSnapshot,
    pub tuning: &'a ActionTuning,
    pub step: u64,
}

/// Immutable snapshot of everything a guard may look at.
#[derive(Clone, Copy)]
pub struct ActionView<'a> {
    pub physics: &'a PhysicsSnapshot,
    pub input: &'a InputSnapshot,
    pub world: &'a WorldSnapshot,
    pub state: &'a CharacterState,
    pub tuning: &'a ActionTuning,
    /// Current primary of the entity
    pub current: Option<ActionKind>,
    /// Current sub-action of the current primary
    pub current_sub: Option<SubActionKind>,
    pub step: u64,
}

impl<'a> ActionView<'a> {
    pub(crate) fn new(
        env: StepEnv<'a>,
        state: &'a CharacterState,
        current: Option<ActionKind>,
        current_sub: Option<SubActionKind>,
    ) -> Self {
        Self {
            physics: env.physics,
            input: env.input,
            world: env.world,
            state,
            tuning: env.tuning,
            current,
            current_sub,
            step: env.step,
        }
    }

    pub fn is_current(&self, kind: ActionKind) -> bool {
        self.current == Some(kind)
    }

    pub fn is_current_sub(&self, kind: SubActionKind) -> bool {
        self.current_sub == Some(kind)
    }

    pub fn grounded(&self) -> bool {
        self.physics.grounded
    }

    /// Ground speed within the rest threshold.
    pub fn at_rest(&self) -> bool {
        self.state.ground_speed.abs() < self.tuning.rest_speed
    }
}

/// Requests an action can raise during its lifecycle calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Requests {
    pub handoff: Option<ActionKind>,
    pub release_parent: bool,
}

/// Mutable access handed to lifecycle calls.
pub struct ActionContext<'a> {
    pub(crate) env: StepEnv<'a>,
    pub state: &'a mut CharacterState,
    pub effects: &'a mut Effects,
    pub(crate) timers: &'a mut TimerTable<TimerEvent>,
    pub(crate) requests: &'a mut Requests,
    pub(crate) owner: ActionId,
    pub(crate) current: Option<ActionKind>,
    pub(crate) current_sub: Option<SubActionKind>,
    pub(crate) replaced: Option<ActionKind>,
    pub(crate) reason: Option<ExitReason>,
}

impl<'a> ActionContext<'a> {
    pub fn physics(&self) -> &'a PhysicsSnapshot {
        self.env.physics
    }

    pub fn input(&self) -> &'a InputSnapshot {
        self.env.input
    }

    pub fn world(&self) -> &'a WorldSnapshot {
        self.env.world
    }

    pub fn tuning(&self) -> &'a ActionTuning {
        self.env.tuning
    }

    pub fn step(&self) -> u64 {
        self.env.step
    }

    pub fn owner(&self) -> ActionId {
        self.owner
    }

    pub fn view(&self) -> ActionView<'_> {
        ActionView::new(self.env, &*self.state, self.current, self.current_sub)
    }

    /// Primary that was force-exited to make room for this launch.
    pub fn replaced(&self) -> Option<ActionKind> {
        self.replaced
    }

    /// Set during `on_end`.
    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.reason
    }

    pub fn schedule(&mut self, steps: u32, tag: TimerTag) -> TimerHandle {
        self.timers.schedule(
            steps,
            TimerEvent {
                owner: self.owner,
                tag,
            },
        )
    }

    pub fn schedule_repeating(&mut self, period: u32, tag: TimerTag) -> TimerHandle {
        self.timers.schedule_repeating(
            period,
            TimerEvent {
                owner: self.owner,
                tag,
            },
        )
    }

    /// Cancel and forget a held handle. Safe on `None` or a fired timer.
    pub fn cancel(&mut self, handle: &mut Option<TimerHandle>) {
        if let Some(handle) = handle.take() {
            self.timers.cancel(handle);
        }
    }

    /// Ask the slot to launch `kind` right after this teardown completes,
    /// bypassing its guard. Only honoured on natural exits; the first
    /// request of a teardown wins.
    pub fn hand_off(&mut self, kind: ActionKind) {
        if self.requests.handoff.is_none() {
            self.requests.handoff = Some(kind);
        }
    }

    /// Clear the hosting primary's consumed flag once this sub-action
    /// ends, so another sub-action may launch in the same activation.
    pub fn release_parent(&mut self) {
        self.requests.release_parent = true;
    }
}
