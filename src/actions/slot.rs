//! Actions domain: the per-entity primary action slot.
//!
//! This module is the only place that moves an action between lifecycle
//! states or changes which action is current. Registration order is
//! priority order: when several actions want to launch on the same step,
//! the earliest registered one wins and the rest stay ready.

use bevy::prelude::*;
use serde::Serialize;

use crate::actions::contract::{ActionContext, ActionView, PrimaryAction, Requests, StepEnv};
use crate::actions::effects::{AnimParam, AnimationTag, Effects};
use crate::actions::error::{TickError, TickFailure};
use crate::actions::kinds::{
    ActionId, ActionKind, ExitReason, Lifecycle, SubActionKind, TimerEvent,
};
use crate::actions::snapshot::Frame;
use crate::actions::state::{CharacterState, InputRestriction};
use crate::actions::sub_slot::{ParentLink, SubActionSlot};
use crate::actions::timer::TimerTable;
use crate::actions::tuning::ActionTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionKind {
    Launched,
    /// Launched from an exiting action's hand-off request
    HandedOff,
    Exited,
    ForcedExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub step: u64,
    pub action: ActionId,
    pub change: TransitionKind,
}

/// Transitions that happened during one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub step: u64,
    pub transitions: Vec<Transition>,
}

impl TickReport {
    pub fn has(&self, action: ActionId, change: TransitionKind) -> bool {
        self.transitions
            .iter()
            .any(|t| t.action == action && t.change == change)
    }

    pub fn launches(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| matches!(t.change, TransitionKind::Launched | TransitionKind::HandedOff))
            .count()
    }
}

/// Per-call identity handed to a lifecycle method.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CallFrame {
    pub owner: ActionId,
    pub current: Option<ActionKind>,
    pub current_sub: Option<SubActionKind>,
    pub replaced: Option<ActionKind>,
    pub reason: Option<ExitReason>,
}

impl CallFrame {
    pub fn new(owner: ActionId, current: Option<ActionKind>, current_sub: Option<SubActionKind>) -> Self {
        Self {
            owner,
            current,
            current_sub,
            replaced: None,
            reason: None,
        }
    }
}

/// Everything mutable during one step, borrowed for its duration.
pub(crate) struct TickScope<'a> {
    pub env: StepEnv<'a>,
    pub state: &'a mut CharacterState,
    pub effects: &'a mut Effects,
    pub timers: &'a mut TimerTable<TimerEvent>,
    pub requests: Requests,
    pub report: TickReport,
}

impl<'a> TickScope<'a> {
    pub fn view(
        &self,
        current: Option<ActionKind>,
        current_sub: Option<SubActionKind>,
    ) -> ActionView<'_> {
        ActionView::new(self.env, &*self.state, current, current_sub)
    }

    pub fn context(&mut self, frame: CallFrame) -> ActionContext<'_> {
        ActionContext {
            env: self.env,
            state: &mut *self.state,
            effects: &mut *self.effects,
            timers: &mut *self.timers,
            requests: &mut self.requests,
            owner: frame.owner,
            current: frame.current,
            current_sub: frame.current_sub,
            replaced: frame.replaced,
            reason: frame.reason,
        }
    }

    pub fn record(&mut self, action: ActionId, change: TransitionKind) {
        debug!("step {}: {} {:?}", self.env.step, action, change);
        self.report.transitions.push(Transition {
            step: self.env.step,
            action,
            change,
        });
    }

    /// Cancel timers still owned by `owner` after its teardown.
    pub fn sweep_timers(&mut self, owner: ActionId) -> Result<(), TickError> {
        let leaked = self.timers.pending_where(|event| event.owner == owner);
        for handle in &leaked {
            self.timers.cancel(*handle);
        }
        match leaked.first() {
            Some(&handle) => Err(TickError::DanglingTimer {
                owner,
                handle,
                count: leaked.len(),
            }),
            None => Ok(()),
        }
    }
}

struct Entry {
    action: Box<dyn PrimaryAction>,
    lifecycle: Lifecycle,
}

/// Arbitrates the primary actions of one controlled entity.
pub struct PrimaryActionSlot {
    loadout: String,
    entries: Vec<Entry>,
    current: Option<usize>,
    previous: Option<ActionKind>,
    timers: TimerTable<TimerEvent>,
}

impl PrimaryActionSlot {
    /// Register actions in priority order.
    pub fn new(loadout: impl Into<String>, actions: Vec<Box<dyn PrimaryAction>>) -> Self {
        Self {
            loadout: loadout.into(),
            entries: actions
                .into_iter()
                .map(|action| Entry {
                    action,
                    lifecycle: Lifecycle::Idle,
                })
                .collect(),
            current: None,
            previous: None,
            timers: TimerTable::new(),
        }
    }

    pub fn loadout(&self) -> &str {
        &self.loadout
    }

    pub fn current(&self) -> Option<ActionKind> {
        self.current.map(|i| self.entries[i].action.kind())
    }

    pub fn current_sub(&self) -> Option<SubActionKind> {
        self.current
            .and_then(|i| self.entries[i].action.sub_actions())
            .and_then(SubActionSlot::current)
    }

    /// Last action that held the slot, for diagnostics only.
    pub fn previous(&self) -> Option<ActionKind> {
        self.previous
    }

    /// Registered kinds in priority order.
    pub fn priorities(&self) -> Vec<ActionKind> {
        self.entries.iter().map(|e| e.action.kind()).collect()
    }

    pub fn lifecycle(&self, kind: ActionKind) -> Option<Lifecycle> {
        self.index_of(kind).map(|i| self.entries[i].lifecycle)
    }

    pub fn sub_slot(&self, parent: ActionKind) -> Option<&SubActionSlot> {
        self.index_of(parent)
            .and_then(|i| self.entries[i].action.sub_actions())
    }

    pub fn active_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.lifecycle == Lifecycle::Active)
            .count()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn step(&self) -> u64 {
        self.timers.now()
    }

    fn index_of(&self, kind: ActionKind) -> Option<usize> {
        self.entries.iter().position(|e| e.action.kind() == kind)
    }

    fn situation(&self) -> (Option<ActionKind>, Option<SubActionKind>) {
        (self.current(), self.current_sub())
    }

    /// Run one fixed step for this entity.
    ///
    /// A frame without a physics snapshot is rejected before anything is
    /// touched, including the step clock. Any other failure still carries
    /// the transitions made earlier in the step.
    pub fn tick(
        &mut self,
        frame: &Frame,
        state: &mut CharacterState,
        effects: &mut Effects,
        tuning: &ActionTuning,
    ) -> Result<TickReport, TickFailure> {
        let Some(physics) = frame.physics.as_ref() else {
            return Err(TickFailure {
                error: TickError::MissingSnapshot,
                report: TickReport {
                    step: self.timers.now(),
                    transitions: Vec::new(),
                },
            });
        };

        state.sync_from(physics);
        state.invulnerable_steps = state.invulnerable_steps.saturating_sub(1);

        let mut timers = std::mem::take(&mut self.timers);
        let step = timers.advance();
        let mut scope = TickScope {
            env: StepEnv {
                physics,
                input: &frame.input,
                world: &frame.world,
                tuning,
                step,
            },
            state,
            effects,
            timers: &mut timers,
            requests: Requests::default(),
            report: TickReport {
                step,
                transitions: Vec::new(),
            },
        };

        let result = self.run_step(&mut scope);
        let TickScope { report, .. } = scope;
        self.timers = timers;
        match result {
            Ok(()) => Ok(report),
            Err(error) => Err(TickFailure { error, report }),
        }
    }

    fn run_step(&mut self, scope: &mut TickScope<'_>) -> Result<(), TickError> {
        self.fire_timers(scope)?;

        if let Some(index) = self.arbitrate(scope) {
            return self.launch(index, scope, TransitionKind::Launched);
        }

        let Some(index) = self.current else {
            return Ok(());
        };
        let kind = self.entries[index].action.kind();
        if self.entries[index].lifecycle != Lifecycle::Active {
            return Err(TickError::violation(
                ActionId::Primary(kind),
                "current action is not active",
            ));
        }

        let (current, current_sub) = self.situation();
        let should_exit = {
            let view = scope.view(current, current_sub);
            self.entries[index].action.exit_condition(&view)
        };
        if should_exit {
            return self.exit(index, scope);
        }

        let entry = &mut self.entries[index];
        {
            let mut ctx = scope.context(CallFrame::new(
                ActionId::Primary(kind),
                current,
                current_sub,
            ));
            entry.action.on_perform(&mut ctx);
        }

        let profile = entry.action.profile();
        if let Some(sub_slot) = entry.action.sub_actions_mut() {
            let parent = ParentLink {
                kind,
                attacking: profile.attacking,
                animation_tag: profile.animation_tag,
            };
            sub_slot.tick(parent, scope)?;
        }

        // A sub-action ending on its own may hand control to another primary.
        if let Some(next) = scope.requests.handoff.take() {
            let next_index = self.handoff_index(ActionId::Primary(kind), next)?;
            return self.launch(next_index, scope, TransitionKind::HandedOff);
        }
        Ok(())
    }

    fn fire_timers(&mut self, scope: &mut TickScope<'_>) -> Result<(), TickError> {
        while let Some((handle, event)) = scope.timers.pop_due() {
            let (current, current_sub) = self.situation();
            let parent_kind = match event.owner {
                ActionId::Primary(kind) => kind,
                ActionId::Sub { parent, .. } => parent,
            };
            let dangling = TickError::DanglingTimer {
                owner: event.owner,
                handle,
                count: 1,
            };
            let Some(index) = self.index_of(parent_kind) else {
                return Err(dangling);
            };
            let entry = &mut self.entries[index];
            if entry.lifecycle != Lifecycle::Active {
                return Err(dangling);
            }

            match event.owner {
                ActionId::Primary(_) => {
                    let mut ctx =
                        scope.context(CallFrame::new(event.owner, current, current_sub));
                    entry.action.on_timer(event.tag, &mut ctx);
                }
                ActionId::Sub { kind, .. } => {
                    let Some(sub_slot) = entry.action.sub_actions_mut() else {
                        return Err(dangling);
                    };
                    sub_slot.fire_timer(parent_kind, kind, event.tag, handle, scope)?;
                }
            }
        }
        scope.requests = Requests::default();
        Ok(())
    }

    /// Steps 1 and 2: poll every non-current action and pick the first
    /// that wants to launch.
    fn arbitrate(&mut self, scope: &mut TickScope<'_>) -> Option<usize> {
        let (current_kind, current_sub) = self.situation();
        let current = self.current;
        let mut selected = None;

        for (i, entry) in self.entries.iter_mut().enumerate() {
            if Some(i) == current {
                continue;
            }
            let view = scope.view(current_kind, current_sub);
            entry.action.observe(&view);
            entry.lifecycle = if !entry.action.can_perform(&view) {
                Lifecycle::Idle
            } else if entry.action.launch_condition(&view) {
                Lifecycle::Launching
            } else {
                Lifecycle::ReadyToLaunch
            };

            if entry.lifecycle == Lifecycle::Launching {
                if selected.is_none() {
                    selected = Some(i);
                } else {
                    entry.lifecycle = Lifecycle::ReadyToLaunch;
                }
            }
        }
        selected
    }

    /// Step 3.
    fn launch(
        &mut self,
        index: usize,
        scope: &mut TickScope<'_>,
        change: TransitionKind,
    ) -> Result<(), TickError> {
        let mut teardown = Ok(());
        let replaced = self.current.filter(|&c| c != index);
        if let Some(old) = replaced {
            if self.entries[old].lifecycle == Lifecycle::Active {
                teardown = self.teardown(old, ExitReason::Forced, scope);
            }
            self.previous = Some(self.entries[old].action.kind());
            self.current = None;
            if let Some(dropped) = scope.requests.handoff.take() {
                debug!("discarding hand-off to {} from forced exit", dropped);
            }
            scope.requests = Requests::default();
        }

        let replaced_kind = replaced.map(|old| self.entries[old].action.kind());
        let entry = &mut self.entries[index];
        let kind = entry.action.kind();
        let profile = entry.action.profile();

        entry.lifecycle = Lifecycle::Active;
        if let Some(sub_slot) = entry.action.sub_actions_mut() {
            sub_slot.rearm();
        }
        scope
            .effects
            .set_int(AnimParam::Action, profile.animation_tag.0);
        {
            let mut frame = CallFrame::new(ActionId::Primary(kind), Some(kind), None);
            frame.replaced = replaced_kind;
            let mut ctx = scope.context(frame);
            entry.action.on_start(&mut ctx);
        }
        if profile.attacking {
            scope.state.attacking = true;
        }
        self.current = Some(index);
        scope.record(ActionId::Primary(kind), change);
        teardown
    }

    /// Step 4, exit branch.
    fn exit(&mut self, index: usize, scope: &mut TickScope<'_>) -> Result<(), TickError> {
        let kind = self.entries[index].action.kind();
        let teardown = self.teardown(index, ExitReason::Natural, scope);
        self.previous = Some(kind);
        self.current = None;
        teardown?;

        let id = ActionId::Primary(kind);
        if let Some(next) = scope.requests.handoff.take() {
            let next_index = self.handoff_index(id, next)?;
            return self.launch(next_index, scope, TransitionKind::HandedOff);
        }

        scope.effects.set_int(AnimParam::Action, AnimationTag::NONE.0);
        if scope.state.input_restriction != InputRestriction::Unrestricted {
            scope.state.input_restriction = InputRestriction::Unrestricted;
            return Err(TickError::InputLeftRestricted { action: id });
        }
        Ok(())
    }

    fn handoff_index(&self, from: ActionId, next: ActionKind) -> Result<usize, TickError> {
        self.index_of(next).ok_or_else(|| {
            TickError::violation(from, format!("hand-off to unregistered action {next}"))
        })
    }

    /// Forced or natural teardown: child sub-action, `on_end`, timer sweep,
    /// `reset`. Always runs to completion; the first error is returned.
    fn teardown(
        &mut self,
        index: usize,
        reason: ExitReason,
        scope: &mut TickScope<'_>,
    ) -> Result<(), TickError> {
        let (current, current_sub) = self.situation();
        let entry = &mut self.entries[index];
        let kind = entry.action.kind();
        let id = ActionId::Primary(kind);
        if entry.lifecycle != Lifecycle::Active {
            return Err(TickError::violation(id, "teardown of an inactive action"));
        }
        let profile = entry.action.profile();

        let child = match entry.action.sub_actions_mut() {
            Some(sub_slot) => {
                let parent = ParentLink {
                    kind,
                    attacking: profile.attacking,
                    animation_tag: profile.animation_tag,
                };
                sub_slot.teardown_current(parent, ExitReason::ParentExit, scope)
            }
            None => Ok(()),
        };

        if profile.attacking {
            scope.state.attacking = false;
        }
        {
            let mut frame = CallFrame::new(id, current, current_sub);
            frame.reason = Some(reason);
            let mut ctx = scope.context(frame);
            entry.action.on_end(&mut ctx);
        }
        let swept = scope.sweep_timers(id);
        entry.action.reset();
        entry.lifecycle = Lifecycle::Idle;

        let change = match reason {
            ExitReason::Natural => TransitionKind::Exited,
            ExitReason::Forced | ExitReason::ParentExit => TransitionKind::ForcedExit,
        };
        scope.record(id, change);
        child.and(swept)
    }
}
