//! Debug domain: debug mode state and the action trace recorder.

use bevy::prelude::*;
use serde::Serialize;
use std::collections::VecDeque;

use crate::actions::{ActionId, ActionTransition, TransitionKind};

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether player is invincible
    pub invincible: bool,
    /// Whether to show debug info overlay (position, action, rings)
    pub show_info: bool,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub entity: u64,
    pub step: u64,
    pub action: ActionId,
    pub change: TransitionKind,
}

impl From<&ActionTransition> for TraceEntry {
    fn from(event: &ActionTransition) -> Self {
        Self {
            entity: event.entity.to_bits(),
            step: event.transition.step,
            action: event.transition.action,
            change: event.transition.change,
        }
    }
}

/// Bounded history of action transitions; the oldest entries drop first.
#[derive(Resource, Debug)]
pub struct ActionTrace {
    capacity: usize,
    entries: VecDeque<TraceEntry>,
}

impl Default for ActionTrace {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl ActionTrace {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn push(&mut self, entry: TraceEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionKind;

    fn entry(step: u64) -> TraceEntry {
        TraceEntry {
            entity: 7,
            step,
            action: ActionId::Primary(ActionKind::Jump),
            change: TransitionKind::Launched,
        }
    }

    #[test]
    fn test_trace_drops_oldest_when_full() {
        let mut trace = ActionTrace::with_capacity(3);
        for step in 0..5 {
            trace.push(entry(step));
        }

        let steps: Vec<u64> = trace.iter().map(|e| e.step).collect();
        assert_eq!(steps, vec![2, 3, 4]);
    }

    #[test]
    fn test_trace_json_names_actions() {
        let mut trace = ActionTrace::default();
        trace.push(entry(12));
        trace.push(TraceEntry {
            action: ActionId::Sub {
                parent: ActionKind::Jump,
                kind: crate::actions::SubActionKind::Glide,
            },
            change: TransitionKind::ForcedExit,
            ..entry(13)
        });

        let json = trace.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["step"], 12);
        assert_eq!(value[0]["action"]["Primary"], "Jump");
        assert_eq!(value[1]["action"]["Sub"]["kind"], "Glide");
        assert_eq!(value[1]["change"], "ForcedExit");
    }
}
