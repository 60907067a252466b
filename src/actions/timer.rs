//! Actions domain: cooperative timer table driven by the fixed step.
//!
//! Timers never run callbacks themselves. [`TimerTable::pop_due`] hands
//! back the payload of each due timer and the owner routes it. A timer
//! cancelled before it is popped is never returned, including when the
//! cancellation happens on the step it was due.

/// Handle to a scheduled timer. Stale handles are harmless: cancelling
/// one is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: u64,
    period: Option<u32>,
    seq: u64,
    payload: T,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    timer: Option<Scheduled<T>>,
}

#[derive(Debug, Clone)]
pub struct TimerTable<T> {
    now: u64,
    next_seq: u64,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Default for TimerTable<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T: Clone> TimerTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step count.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Fire once after `steps` steps (a zero duration fires on the next step).
    pub fn schedule(&mut self, steps: u32, payload: T) -> TimerHandle {
        self.insert(steps.max(1), None, payload)
    }

    /// Fire every `period` steps until cancelled.
    pub fn schedule_repeating(&mut self, period: u32, payload: T) -> TimerHandle {
        let period = period.max(1);
        self.insert(period, Some(period), payload)
    }

    /// Cancel a timer. Returns whether a pending timer was removed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            return false;
        };
        if slot.generation != handle.generation || slot.timer.is_none() {
            return false;
        }
        slot.timer = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        true
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.slots
            .get(handle.index as usize)
            .is_some_and(|slot| slot.generation == handle.generation && slot.timer.is_some())
    }

    /// Advance the clock by one step and return the new step count.
    pub fn advance(&mut self) -> u64 {
        self.now += 1;
        self.now
    }

    /// Remove and return the earliest timer due at or before now.
    /// Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self) -> Option<(TimerHandle, T)> {
        let now = self.now;
        let (index, _) = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.timer.as_ref().map(|t| (i, (t.due, t.seq))))
            .filter(|(_, (due, _))| *due <= now)
            .min_by_key(|(_, key)| *key)?;

        let slot = &mut self.slots[index];
        let handle = TimerHandle {
            index: index as u32,
            generation: slot.generation,
        };
        let timer = slot.timer.as_mut()?;
        let payload = timer.payload.clone();
        let period = timer.period;
        match period {
            Some(period) => {
                timer.due = now + u64::from(period);
            }
            None => {
                slot.timer = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        Some((handle, payload))
    }

    /// Handles of pending timers whose payload matches.
    pub fn pending_where(&self, mut matches: impl FnMut(&T) -> bool) -> Vec<TimerHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let timer = slot.timer.as_ref()?;
                matches(&timer.payload).then_some(TimerHandle {
                    index: i as u32,
                    generation: slot.generation,
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.timer.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, delay: u32, period: Option<u32>, payload: T) -> TimerHandle {
        let timer = Scheduled {
            due: self.now + u64::from(delay),
            period,
            seq: self.next_seq,
            payload,
        };
        self.next_seq += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.timer = Some(timer);
            TimerHandle {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                timer: Some(timer),
            });
            TimerHandle {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(table: &mut TimerTable<&'static str>) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some((_, payload)) = table.pop_due() {
            fired.push(payload);
        }
        fired
    }

    #[test]
    fn test_one_shot_fires_after_duration() {
        let mut table = TimerTable::new();
        table.schedule(3, "charge");

        table.advance();
        assert!(drain(&mut table).is_empty());
        table.advance();
        assert!(drain(&mut table).is_empty());
        table.advance();
        assert_eq!(drain(&mut table), vec!["charge"]);
        table.advance();
        assert!(drain(&mut table).is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_zero_duration_fires_next_step() {
        let mut table = TimerTable::new();
        let handle = table.schedule(0, "now");
        assert!(drain(&mut table).is_empty());
        assert!(table.is_pending(handle));
        table.advance();
        assert_eq!(drain(&mut table), vec!["now"]);
    }

    #[test]
    fn test_cancel_on_due_step_never_fires() {
        let mut table = TimerTable::new();
        let handle = table.schedule(2, "flicker");
        table.advance();
        table.advance();
        // Due now, but cancelled before the owner drains it
        assert!(table.cancel(handle));
        assert!(drain(&mut table).is_empty());
    }

    #[test]
    fn test_cancel_is_idempotent_and_safe_after_fire() {
        let mut table = TimerTable::new();
        let handle = table.schedule(1, "once");
        table.advance();
        assert_eq!(drain(&mut table), vec!["once"]);

        assert!(!table.cancel(handle));
        assert!(!table.cancel(handle));
    }

    #[test]
    fn test_stale_handle_does_not_cancel_reused_slot() {
        let mut table = TimerTable::new();
        let old = table.schedule(1, "old");
        assert!(table.cancel(old));

        let new = table.schedule(2, "new");
        assert!(!table.cancel(old));
        assert!(table.is_pending(new));

        table.advance();
        table.advance();
        assert_eq!(drain(&mut table), vec!["new"]);
    }

    #[test]
    fn test_repeating_timer_fires_each_period_until_cancelled() {
        let mut table = TimerTable::new();
        let handle = table.schedule_repeating(2, "dust");
        let mut fired = 0;
        for _ in 0..6 {
            table.advance();
            fired += drain(&mut table).len();
        }
        assert_eq!(fired, 3);

        table.cancel(handle);
        for _ in 0..4 {
            table.advance();
            assert!(drain(&mut table).is_empty());
        }
    }

    #[test]
    fn test_due_timers_pop_in_schedule_order() {
        let mut table = TimerTable::new();
        table.schedule(2, "second");
        table.schedule(1, "first");
        table.schedule(2, "third");
        table.advance();
        table.advance();
        assert_eq!(drain(&mut table), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_pending_where_filters_by_payload() {
        let mut table = TimerTable::new();
        table.schedule(5, "a");
        let b = table.schedule(5, "b");
        assert_eq!(table.pending_where(|p| *p == "b"), vec![b]);
        assert_eq!(table.len(), 2);
    }
}
