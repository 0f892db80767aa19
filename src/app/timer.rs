// (C) 2025 - Enzo Lombardi
//! Timer wheel and `invoke_later` queue driven by the Consumer thread.
//!
//! Timers are kept in a `BTreeMap<Instant, Vec<Timer>>` keyed by next-due time; ties are broken by
//! a monotonic sequence number so same-instant timers fire in registration order. Recurring
//! timers always reschedule to `fired_at + period`, never trying to catch up missed ticks.

use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};

/// Opaque handle returned by [`TimerWheel::schedule`], usable with [`TimerWheel::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimerId(u64);

enum Recurrence {
    Once,
    Every(Duration),
}

struct ScheduledTimer {
    id: TimerId,
    recurrence: Recurrence,
    cancelled: bool,
}

/// A timer that fired: the Consumer looks up and runs whatever action was associated with
/// `id` (e.g. the action closure stored alongside it by the caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
}

/// Sorted set of pending timers, keyed by due time.
pub struct TimerWheel {
    pending: BTreeMap<Instant, Vec<ScheduledTimer>>,
    next_seq: u64,
}

impl TimerWheel {
    pub fn new() -> Self {
        Self { pending: BTreeMap::new(), next_seq: 0 }
    }

    fn next_id(&mut self) -> TimerId {
        let id = TimerId(self.next_seq);
        self.next_seq += 1;
        id
    }

    /// Schedules a one-shot timer to fire after `delay`.
    pub fn schedule_once(&mut self, delay: Duration) -> TimerId {
        let id = self.next_id();
        self.pending.entry(Instant::now() + delay).or_default().push(ScheduledTimer {
            id,
            recurrence: Recurrence::Once,
            cancelled: false,
        });
        id
    }

    /// Schedules a recurring timer that first fires after `period`, then reschedules itself to
    /// `fire_time + period` every time it fires (drift-tolerant: never catches up missed ticks).
    pub fn schedule_recurring(&mut self, period: Duration) -> TimerId {
        let id = self.next_id();
        self.pending.entry(Instant::now() + period).or_default().push(ScheduledTimer {
            id,
            recurrence: Recurrence::Every(period),
            cancelled: false,
        });
        id
    }

    /// Marks a timer cancelled; it is dropped the next time its bucket is visited instead of
    /// firing or rescheduling.
    pub fn cancel(&mut self, id: TimerId) {
        for timers in self.pending.values_mut() {
            for timer in timers.iter_mut() {
                if timer.id == id {
                    timer.cancelled = true;
                }
            }
        }
    }

    /// Pops every timer due at or before `now`, rescheduling recurring ones, and returns the
    /// fired ids in due-time then registration order.
    pub fn fire_due(&mut self, now: Instant) -> Vec<FiredTimer> {
        let due_keys: Vec<Instant> = self.pending.range(..=now).map(|(k, _)| *k).collect();
        let mut fired = Vec::new();
        for key in due_keys {
            let Some(timers) = self.pending.remove(&key) else { continue };
            for timer in timers {
                if timer.cancelled {
                    continue;
                }
                fired.push(FiredTimer { id: timer.id });
                if let Recurrence::Every(period) = timer.recurrence {
                    self.pending.entry(now + period).or_default().push(ScheduledTimer {
                        id: timer.id,
                        recurrence: Recurrence::Every(period),
                        cancelled: false,
                    });
                }
            }
        }
        fired
    }

    /// Time until the next timer is due, for the Reader to clamp its `poll_input` timeout to.
    /// `None` if there are no pending timers.
    pub fn next_due_in(&self, now: Instant) -> Option<Duration> {
        self.pending.keys().next().map(|due| due.saturating_duration_since(now))
    }
}

impl Default for TimerWheel {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue of boxed closures posted from any thread, drained and run on the Consumer thread before
/// the next redraw. `T` is the application-level context the closures receive (e.g.
/// `&mut Application`).
pub struct InvokeLaterQueue<T> {
    tasks: std::sync::Mutex<VecDeque<Box<dyn FnOnce(&mut T) + Send>>>,
}

impl<T> InvokeLaterQueue<T> {
    pub fn new() -> Self {
        Self { tasks: std::sync::Mutex::new(VecDeque::new()) }
    }

    /// Posts `task` to run on the Consumer thread. Tasks from the same poster run in posting
    /// order; this is the only ordering guarantee across posters.
    pub fn push(&self, task: impl FnOnce(&mut T) + Send + 'static) {
        self.tasks.lock().expect("invoke_later queue mutex poisoned").push_back(Box::new(task));
    }

    /// Drains and runs every queued task against `context`, in posting order.
    pub fn run_all(&self, context: &mut T) {
        let drained: Vec<_> = self.tasks.lock().expect("invoke_later queue mutex poisoned").drain(..).collect();
        for task in drained {
            task(context);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().expect("invoke_later queue mutex poisoned").is_empty()
    }
}

impl<T> Default for InvokeLaterQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_timer_fires_once() {
        let mut wheel = TimerWheel::new();
        let id = wheel.schedule_once(Duration::from_millis(0));
        let now = Instant::now();
        let fired = wheel.fire_due(now);
        assert_eq!(fired, vec![FiredTimer { id }]);
        assert!(wheel.fire_due(now).is_empty());
    }

    #[test]
    fn recurring_timer_reschedules_from_fire_time() {
        let mut wheel = TimerWheel::new();
        let id = wheel.schedule_recurring(Duration::from_millis(0));
        let first = Instant::now();
        let fired = wheel.fire_due(first);
        assert_eq!(fired, vec![FiredTimer { id }]);

        // Not due again until another `period` has elapsed from `first`, even if we advance past
        // several missed ticks - no catch-up firing.
        assert!(wheel.fire_due(first).is_empty());
        let later = first + Duration::from_millis(1);
        assert_eq!(wheel.fire_due(later), vec![FiredTimer { id }]);
    }

    #[test]
    fn cancelled_timer_does_not_fire() {
        let mut wheel = TimerWheel::new();
        let id = wheel.schedule_once(Duration::from_millis(0));
        wheel.cancel(id);
        assert!(wheel.fire_due(Instant::now()).is_empty());
    }

    #[test]
    fn next_due_in_reflects_nearest_timer() {
        let mut wheel = TimerWheel::new();
        assert_eq!(wheel.next_due_in(Instant::now()), None);
        wheel.schedule_once(Duration::from_millis(50));
        let remaining = wheel.next_due_in(Instant::now()).expect("a timer is pending");
        assert!(remaining <= Duration::from_millis(50));
    }

    #[test]
    fn invoke_later_runs_tasks_in_posting_order() {
        let queue: InvokeLaterQueue<Vec<i32>> = InvokeLaterQueue::new();
        queue.push(|ctx| ctx.push(1));
        queue.push(|ctx| ctx.push(2));
        let mut context = Vec::new();
        queue.run_all(&mut context);
        assert_eq!(context, vec![1, 2]);
    }
}
