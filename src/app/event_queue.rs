// (C) 2025 - Enzo Lombardi
//! Fill/drain event queue shared between the Reader and Consumer threads.
//!
//! The Reader pushes events it reads off the backend; the Consumer drains them in FIFO order.
//! Guarded by a single `Mutex` + `Condvar` pair rather than a channel, so the same lock also
//! protects the shutdown flag the Reader checks on every iteration.

use crate::core::event::Event;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

struct State {
    events: VecDeque<Event>,
    shutdown: bool,
}

/// FIFO queue of [`Event`]s plus a shutdown flag, shared between the Reader and Consumer threads.
pub struct EventQueue {
    state: Mutex<State>,
    condvar: Condvar,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State { events: VecDeque::new(), shutdown: false }),
            condvar: Condvar::new(),
        }
    }

    /// Called by the Reader after reading one or more events off the backend.
    pub fn push(&self, event: Event) {
        let mut state = self.state.lock().expect("event queue mutex poisoned");
        state.events.push_back(event);
        self.condvar.notify_one();
    }

    /// Drains every currently queued event in FIFO order without blocking.
    pub fn drain(&self) -> Vec<Event> {
        let mut state = self.state.lock().expect("event queue mutex poisoned");
        state.events.drain(..).collect()
    }

    /// Blocks the Consumer until an event arrives, the queue is shut down, or `timeout` elapses
    /// (`timeout` is the time remaining until the nearest due timer). Returns whatever is
    /// available when it wakes, which may be empty on a timer-driven wakeup.
    pub fn wait_for_events(&self, timeout: Duration) -> Vec<Event> {
        let mut state = self.state.lock().expect("event queue mutex poisoned");
        if !state.events.is_empty() || state.shutdown {
            return state.events.drain(..).collect();
        }
        let (mut state, _timeout_result) = self
            .condvar
            .wait_timeout(state, timeout)
            .expect("event queue mutex poisoned");
        state.events.drain(..).collect()
    }

    /// Signals both threads to stop and wakes any thread blocked in `wait_for_events`.
    pub fn shutdown(&self) {
        let mut state = self.state.lock().expect("event queue mutex poisoned");
        state.shutdown = true;
        self.condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.state.lock().expect("event queue mutex poisoned").shutdown
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::EventType;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn push_then_drain_preserves_fifo_order() {
        let queue = EventQueue::new();
        queue.push(Event::keyboard(1));
        queue.push(Event::keyboard(2));
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].key_code, 1);
        assert_eq!(drained[1].key_code, 2);
    }

    #[test]
    fn drain_on_empty_queue_returns_empty_vec() {
        let queue = EventQueue::new();
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn wait_for_events_wakes_on_push_from_another_thread() {
        let queue = Arc::new(EventQueue::new());
        let pusher = Arc::clone(&queue);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            pusher.push(Event::command(42));
        });

        let events = queue.wait_for_events(Duration::from_secs(5));
        handle.join().expect("pusher thread panicked");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].what, EventType::Command);
        assert_eq!(events[0].command, 42);
    }

    #[test]
    fn wait_for_events_times_out_with_empty_vec() {
        let queue = EventQueue::new();
        let events = queue.wait_for_events(Duration::from_millis(10));
        assert!(events.is_empty());
    }

    #[test]
    fn shutdown_wakes_a_blocked_waiter() {
        let queue = Arc::new(EventQueue::new());
        let shutter = Arc::clone(&queue);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            shutter.shutdown();
        });

        queue.wait_for_events(Duration::from_secs(5));
        handle.join().expect("shutdown thread panicked");
        assert!(queue.is_shutdown());
    }
}
