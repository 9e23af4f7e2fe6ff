//! Cancelable timers.
//!
//! The page only ever needs two primitives: a repeating interval (carousel
//! auto-play) and a one-shot timeout (gallery fade-in). Both are requested
//! through [`Scheduler`] and identified by a [`TimerId`]; when one fires, the
//! host hands the id back to [`crate::page::Page::on_timer`].
//!
//! [`VirtualClock`] is a deterministic scheduler driven by explicit time
//! advances. It keeps a queue of pending tasks ordered by due time, then by
//! scheduling order, and reschedules intervals after they fire.

use std::time::Duration;

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
pub fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

pub trait Scheduler {
    /// Fire every `period` until cleared.
    fn set_interval(&mut self, period: Duration) -> TimerId;

    /// Fire once after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer. Returns false when it was not pending.
    fn clear(&mut self, id: TimerId) -> bool;
}

/// Snapshot of a timer waiting to fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at_ms: u64,
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Clone)]
struct Task {
    id: TimerId,
    due_at: u64,
    order: u64,
    interval: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now_ms: u64,
    next_id: u64,
    next_order: u64,
    queue: Vec<Task>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Pending timers, earliest first.
    pub fn pending(&self) -> Vec<PendingTimer> {
        let mut tasks: Vec<&Task> = self.queue.iter().collect();
        tasks.sort_by_key(|t| (t.due_at, t.order));
        tasks
            .into_iter()
            .map(|t| PendingTimer {
                id: t.id,
                due_at_ms: t.due_at,
                interval_ms: t.interval,
            })
            .collect()
    }

    /// Pop the earliest timer due at or before `limit_ms`, moving the clock to
    /// its due time. Intervals are re-queued one period later.
    pub fn next_due(&mut self, limit_ms: u64) -> Option<TimerId> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= limit_ms)
            .min_by_key(|(_, t)| (t.due_at, t.order))
            .map(|(i, _)| i)?;

        let task = self.queue.remove(idx);
        self.now_ms = self.now_ms.max(task.due_at);
        // An interval whose next run falls past the end of time is dropped.
        if let Some(due_at) = task.interval.and_then(|p| task.due_at.checked_add(p)) {
            let order = self.bump_order();
            self.queue.push(Task {
                due_at,
                order,
                ..task.clone()
            });
        }
        Some(task.id)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn bump_order(&mut self) -> u64 {
        self.next_order += 1;
        self.next_order
    }

    fn schedule(&mut self, delay: Duration, interval: Option<u64>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let order = self.bump_order();
        // Zero periods would spin forever on a single advance.
        let delay_ms = millis(delay).max(u64::from(interval.is_some()));
        self.queue.push(Task {
            id,
            due_at: self.now_ms.saturating_add(delay_ms),
            order,
            interval: interval.map(|p| p.max(1)),
        });
        id
    }
}

impl Scheduler for VirtualClock {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.schedule(period, Some(millis(period)))
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.schedule(delay, None)
    }

    fn clear(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.id != id);
        self.queue.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_fires_once() {
        let mut clock = VirtualClock::new();
        let id = clock.set_timeout(Duration::from_millis(50));
        assert_eq!(clock.next_due(49), None);
        assert_eq!(clock.next_due(50), Some(id));
        assert_eq!(clock.now_ms(), 50);
        assert_eq!(clock.next_due(10_000), None);
    }

    #[test]
    fn interval_repeats_until_cleared() {
        let mut clock = VirtualClock::new();
        let id = clock.set_interval(Duration::from_millis(100));
        assert_eq!(clock.next_due(250), Some(id));
        assert_eq!(clock.next_due(250), Some(id));
        assert_eq!(clock.next_due(250), None);
        assert_eq!(clock.pending()[0].due_at_ms, 300);

        assert!(clock.clear(id));
        assert!(!clock.clear(id));
        assert_eq!(clock.next_due(10_000), None);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut clock = VirtualClock::new();
        let a = clock.set_timeout(Duration::from_millis(10));
        let b = clock.set_timeout(Duration::from_millis(10));
        let c = clock.set_timeout(Duration::from_millis(5));
        assert_eq!(clock.next_due(10), Some(c));
        assert_eq!(clock.next_due(10), Some(a));
        assert_eq!(clock.next_due(10), Some(b));
    }

    #[test]
    fn timers_are_relative_to_now() {
        let mut clock = VirtualClock::new();
        clock.set_now(1_000);
        clock.set_timeout(Duration::from_millis(50));
        assert_eq!(clock.pending()[0].due_at_ms, 1_050);
    }

    #[test]
    fn far_future_saturates_instead_of_overflowing() {
        let mut clock = VirtualClock::new();
        clock.set_now(u64::MAX - 10);
        let id = clock.set_interval(Duration::from_millis(100));
        assert_eq!(clock.pending()[0].due_at_ms, u64::MAX);
        assert_eq!(clock.next_due(u64::MAX), Some(id));
        assert_eq!(clock.next_due(u64::MAX), None);
        assert!(clock.pending().is_empty());
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn zero_interval_does_not_spin() {
        let mut clock = VirtualClock::new();
        let id = clock.set_interval(Duration::ZERO);
        assert_eq!(clock.pending()[0].due_at_ms, 1);
        assert_eq!(clock.next_due(1), Some(id));
        assert_eq!(clock.next_due(1), None);
    }
}
