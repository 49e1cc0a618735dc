#![forbid(unsafe_code)]

//! Thread-safe FIFO of decoded key events.
//!
//! The input thread pushes, any number of consumer threads pop. Popping is
//! all-or-nothing: asking for more events than are queued returns `None`
//! and leaves the queue untouched, which callers treat as "try again later".
//!
//! # Example
//!
//! ```
//! use stui_core::event::{KeyEvent, KeyName};
//! use stui_core::input_queue::{InputQueue, Take};
//!
//! let queue = InputQueue::new();
//! queue.push(KeyEvent::Char(' '));
//! queue.push(KeyEvent::Char('a'));
//! queue.push(KeyEvent::Named(KeyName::Escape));
//!
//! assert_eq!(queue.pop(Take::Count(5), false), None);
//! let popped = queue.pop(Take::Count(2), true).unwrap();
//! assert_eq!(popped, vec![KeyEvent::Char(' '), KeyEvent::Char('a')]);
//! assert!(queue.is_empty());
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::event::KeyEvent;
use crate::stop::StopSignal;

/// How often a blocked [`InputQueue::wait_pop`] rechecks its stop signal.
///
/// The stop flag waits on its own condvar, so a stop alone never wakes the
/// queue's; this poll bounds how late a stop-only caller notices it.
/// [`InputQueue::close`] wakes waiters at once.
const STOP_POLL: Duration = Duration::from_millis(25);

/// How many events a pop should remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Take {
    /// Everything currently queued. Always succeeds, possibly with nothing.
    All,
    /// Exactly this many, or nothing at all. `Count(0)` never succeeds.
    Count(usize),
}

#[derive(Debug, Default)]
struct QueueState {
    events: VecDeque<KeyEvent>,
    closed: bool,
}

impl QueueState {
    fn take(&mut self, take: Take, flush: bool) -> Option<Vec<KeyEvent>> {
        let count = match take {
            Take::All => self.events.len(),
            Take::Count(0) => return None,
            Take::Count(n) if n > self.events.len() => return None,
            Take::Count(n) => n,
        };
        let popped: Vec<KeyEvent> = self.events.drain(..count).collect();
        if flush {
            self.events.clear();
        }
        Some(popped)
    }

    fn satisfies(&self, take: Take) -> bool {
        match take {
            Take::All => !self.events.is_empty(),
            Take::Count(n) => n > 0 && self.events.len() >= n,
        }
    }
}

/// Shared handle to the process-wide input queue.
///
/// Cloning the handle shares the same queue.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    inner: Arc<(Mutex<QueueState>, Condvar)>,
}

impl InputQueue {
    /// Create an empty, open queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, QueueState> {
        self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an event and wake waiting consumers.
    ///
    /// Events pushed after [`close`](Self::close) are dropped.
    pub fn push(&self, event: KeyEvent) {
        let mut state = self.state();
        if state.closed {
            tracing::trace!(%event, "input queue closed, dropping event");
            return;
        }
        state.events.push_back(event);
        self.inner.1.notify_all();
    }

    /// Remove the first events from the queue.
    ///
    /// Returns `None` when fewer events than requested are queued (or for
    /// `Take::Count(0)`); the queue is not modified in that case. When `flush`
    /// is set, whatever remains after a successful pop is discarded.
    pub fn pop(&self, take: Take, flush: bool) -> Option<Vec<KeyEvent>> {
        self.state().take(take, flush)
    }

    /// Remove the oldest event, if any.
    pub fn pop_one(&self) -> Option<KeyEvent> {
        self.state().events.pop_front()
    }

    /// Block until the request can be satisfied, then pop.
    ///
    /// `Take::All` waits for at least one event. Returns `None` once the
    /// queue is closed or `stop` is triggered and the request is still unmet.
    pub fn wait_pop(&self, take: Take, stop: &StopSignal) -> Option<Vec<KeyEvent>> {
        if take == Take::Count(0) {
            return None;
        }
        let mut state = self.state();
        while !state.satisfies(take) {
            if state.closed || stop.is_stopped() {
                return None;
            }
            let (guard, _) = self
                .inner
                .1
                .wait_timeout(state, STOP_POLL)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
        state.take(take, false)
    }

    /// Like [`wait_pop`](Self::wait_pop) but gives up after `timeout`.
    pub fn wait_pop_timeout(&self, take: Take, timeout: Duration) -> Option<Vec<KeyEvent>> {
        if take == Take::Count(0) {
            return None;
        }
        let deadline = Instant::now() + timeout;
        let mut state = self.state();
        while !state.closed && !state.satisfies(take) {
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let (guard, _) = self
                .inner
                .1
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
        state.take(take, false).filter(|popped| !popped.is_empty())
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.state().events.len()
    }

    /// Whether the queue holds no events.
    pub fn is_empty(&self) -> bool {
        self.state().events.is_empty()
    }

    /// Discard every queued event.
    pub fn clear(&self) {
        self.state().events.clear();
    }

    /// Mark the queue as finished: no further pushes are accepted and
    /// blocked consumers wake up. Already queued events can still be popped.
    pub fn close(&self) {
        let mut state = self.state();
        if !state.closed {
            state.closed = true;
            tracing::debug!(pending = state.events.len(), "input queue closed");
        }
        self.inner.1.notify_all();
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.state().closed
    }
}
