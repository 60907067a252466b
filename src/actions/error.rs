//! Actions domain: errors surfaced by the scheduler and by composition.

use crate::actions::kinds::{ActionId, ActionKind, SubActionKind};
use crate::actions::slot::TickReport;
use crate::actions::timer::TimerHandle;

/// A step that could not run cleanly for one entity.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TickError {
    /// No physics snapshot this frame; the step was skipped untouched.
    #[error("physics snapshot missing, step skipped")]
    MissingSnapshot,

    #[error("contract violation in {action}: {detail}")]
    ContractViolation { action: ActionId, detail: String },

    /// An action reached `reset` with timers still pending. They were
    /// cancelled before they could fire.
    #[error("{owner} left {count} timer(s) pending past reset (first {handle:?})")]
    DanglingTimer {
        owner: ActionId,
        handle: TimerHandle,
        count: usize,
    },

    #[error("{action} exited with input still restricted")]
    InputLeftRestricted { action: ActionId },
}

impl TickError {
    pub fn violation(action: ActionId, detail: impl Into<String>) -> Self {
        TickError::ContractViolation {
            action,
            detail: detail.into(),
        }
    }

    /// Whether the error points at a composition bug rather than a
    /// missing external input.
    pub fn is_contract_bug(&self) -> bool {
        !matches!(self, TickError::MissingSnapshot)
    }
}

/// A step that failed part-way. `report` holds the transitions that
/// completed before the failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("step {}: {error}", .report.step)]
pub struct TickFailure {
    #[source]
    pub error: TickError,
    pub report: TickReport,
}

/// A loadout that cannot be turned into a consistent slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    #[error("loadout '{loadout}' registers {kind} twice")]
    DuplicatePrimary { loadout: String, kind: ActionKind },

    #[error("loadout '{loadout}' registers sub-action {kind} twice")]
    DuplicateSub {
        loadout: String,
        kind: SubActionKind,
    },

    #[error("loadout '{loadout}': {kind} requires {requires}")]
    MissingPrerequisite {
        loadout: String,
        kind: String,
        requires: String,
    },

    #[error("loadout '{loadout}': {earlier} must be declared before {later}")]
    PriorityOrder {
        loadout: String,
        earlier: String,
        later: String,
    },

    #[error("loadout '{loadout}' declares no primary actions")]
    Empty { loadout: String },

    #[error("unknown loadout '{0}'")]
    UnknownLoadout(String),
}
