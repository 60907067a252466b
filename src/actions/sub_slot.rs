//! Actions domain: sub-actions nested under one primary action.
//!
//! Arbitration mirrors the primary slot. On top of that, nothing launches
//! once a sub-action has launched during the current activation of the
//! hosting primary, until that primary is launched afresh or the
//! sub-action that consumed the activation releases it on exit.

use crate::actions::contract::{ActionView, SubAction};
use crate::actions::effects::{AnimParam, AnimationTag};
use crate::actions::error::TickError;
use crate::actions::kinds::{ActionId, ActionKind, ExitReason, Lifecycle, SubActionKind, TimerTag};
use crate::actions::slot::{CallFrame, TickScope, TransitionKind};
use crate::actions::timer::TimerHandle;

/// What a sub-action slot needs to know about its hosting primary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParentLink {
    pub kind: ActionKind,
    pub attacking: bool,
    pub animation_tag: AnimationTag,
}

struct SubEntry {
    action: Box<dyn SubAction>,
    lifecycle: Lifecycle,
}

pub struct SubActionSlot {
    entries: Vec<SubEntry>,
    current: Option<usize>,
    previous: Option<SubActionKind>,
    consumed: bool,
}

impl SubActionSlot {
    /// Register sub-actions in priority order.
    pub fn new(actions: Vec<Box<dyn SubAction>>) -> Self {
        Self {
            entries: actions
                .into_iter()
                .map(|action| SubEntry {
                    action,
                    lifecycle: Lifecycle::Idle,
                })
                .collect(),
            current: None,
            previous: None,
            consumed: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn priorities(&self) -> Vec<SubActionKind> {
        self.entries.iter().map(|e| e.action.kind()).collect()
    }

    pub fn current(&self) -> Option<SubActionKind> {
        self.current.map(|i| self.entries[i].action.kind())
    }

    pub fn previous(&self) -> Option<SubActionKind> {
        self.previous
    }

    /// A sub-action already launched during this parent activation.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub fn lifecycle(&self, kind: SubActionKind) -> Option<Lifecycle> {
        self.entries
            .iter()
            .find(|e| e.action.kind() == kind)
            .map(|e| e.lifecycle)
    }

    pub fn active_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.lifecycle == Lifecycle::Active)
            .count()
    }

    /// Whether the current sub-action keeps the parent from exiting.
    pub fn holds_parent(&self, view: &ActionView<'_>) -> bool {
        self.current
            .is_some_and(|i| self.entries[i].action.holds_parent(view))
    }

    /// Fresh activation of the hosting primary.
    pub(crate) fn rearm(&mut self) {
        self.consumed = false;
    }

    fn id(parent: ActionKind, kind: SubActionKind) -> ActionId {
        ActionId::Sub { parent, kind }
    }

    pub(crate) fn tick(
        &mut self,
        parent: ParentLink,
        scope: &mut TickScope<'_>,
    ) -> Result<(), TickError> {
        if let Some(index) = self.arbitrate(parent, scope) {
            return self.launch(index, parent, scope);
        }

        let Some(index) = self.current else {
            return Ok(());
        };
        let current_sub = self.current();
        let entry = &mut self.entries[index];
        let id = Self::id(parent.kind, entry.action.kind());
        if entry.lifecycle != Lifecycle::Active {
            return Err(TickError::violation(id, "current sub-action is not active"));
        }

        let should_exit = {
            let view = scope.view(Some(parent.kind), current_sub);
            entry.action.exit_condition(&view)
        };
        if should_exit {
            return self.teardown_current(parent, ExitReason::Natural, scope);
        }

        let mut ctx = scope.context(CallFrame::new(id, Some(parent.kind), current_sub));
        entry.action.on_perform(&mut ctx);
        Ok(())
    }

    fn arbitrate(&mut self, parent: ParentLink, scope: &mut TickScope<'_>) -> Option<usize> {
        let current_sub = self.current();
        let current = self.current;
        let consumed = self.consumed;
        let mut selected = None;

        for (i, entry) in self.entries.iter_mut().enumerate() {
            if Some(i) == current {
                continue;
            }
            if consumed {
                entry.lifecycle = Lifecycle::Idle;
                continue;
            }
            let view = scope.view(Some(parent.kind), current_sub);
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

    fn launch(
        &mut self,
        index: usize,
        parent: ParentLink,
        scope: &mut TickScope<'_>,
    ) -> Result<(), TickError> {
        let teardown = match self.current {
            Some(old) if old != index => {
                self.teardown_current(parent, ExitReason::Forced, scope)
            }
            _ => Ok(()),
        };

        let entry = &mut self.entries[index];
        let kind = entry.action.kind();
        let id = Self::id(parent.kind, kind);
        let profile = entry.action.profile();

        entry.lifecycle = Lifecycle::Active;
        self.consumed = true;
        scope
            .effects
            .set_int(AnimParam::Action, profile.animation_tag.0);
        {
            let mut ctx = scope.context(CallFrame::new(id, Some(parent.kind), Some(kind)));
            entry.action.on_start(&mut ctx);
        }
        if profile.attacking {
            scope.state.attacking = true;
        }
        self.current = Some(index);
        scope.record(id, TransitionKind::Launched);
        teardown
    }

    /// Tear down the current sub-action, if any. Runs to completion and
    /// reports the first problem found.
    pub(crate) fn teardown_current(
        &mut self,
        parent: ParentLink,
        reason: ExitReason,
        scope: &mut TickScope<'_>,
    ) -> Result<(), TickError> {
        let Some(index) = self.current else {
            return Ok(());
        };
        let entry = &mut self.entries[index];
        let kind = entry.action.kind();
        let id = Self::id(parent.kind, kind);
        if entry.lifecycle != Lifecycle::Active {
            self.current = None;
            return Err(TickError::violation(id, "teardown of an inactive sub-action"));
        }
        let profile = entry.action.profile();

        if profile.attacking && !parent.attacking {
            scope.state.attacking = false;
        }
        {
            let mut frame = CallFrame::new(id, Some(parent.kind), Some(kind));
            frame.reason = Some(reason);
            let mut ctx = scope.context(frame);
            entry.action.on_end(&mut ctx);
        }
        let swept = scope.sweep_timers(id);
        entry.action.reset();
        entry.lifecycle = Lifecycle::Idle;

        self.previous = Some(kind);
        self.current = None;
        if scope.requests.release_parent {
            scope.requests.release_parent = false;
            self.consumed = false;
        }
        if reason != ExitReason::ParentExit {
            scope
                .effects
                .set_int(AnimParam::Action, parent.animation_tag.0);
        }

        let change = match reason {
            ExitReason::Natural => TransitionKind::Exited,
            ExitReason::Forced | ExitReason::ParentExit => TransitionKind::ForcedExit,
        };
        scope.record(id, change);
        swept
    }

    pub(crate) fn fire_timer(
        &mut self,
        parent: ActionKind,
        kind: SubActionKind,
        tag: TimerTag,
        handle: TimerHandle,
        scope: &mut TickScope<'_>,
    ) -> Result<(), TickError> {
        let id = Self::id(parent, kind);
        let current_sub = self.current();
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.action.kind() == kind && e.lifecycle == Lifecycle::Active)
        else {
            return Err(TickError::DanglingTimer {
                owner: id,
                handle,
                count: 1,
            });
        };
        let mut ctx = scope.context(CallFrame::new(id, Some(parent), current_sub));
        entry.action.on_timer(tag, &mut ctx);
        Ok(())
    }
}
