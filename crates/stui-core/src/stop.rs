#![forbid(unsafe_code)]

//! Cooperative cancellation shared between the input thread and consumers.
//!
//! A [`StopTrigger`] sets the flag once; every cloned [`StopSignal`] observes
//! it. Waiters block on a condition variable instead of spinning on a plain
//! boolean.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

type Shared = Arc<(Mutex<bool>, Condvar)>;

/// Observer side of a stop flag.
#[derive(Debug, Clone)]
pub struct StopSignal {
    inner: Shared,
}

impl StopSignal {
    /// Create a new stop signal pair (signal, trigger).
    #[must_use]
    pub fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: inner.clone(),
        };
        (signal, StopTrigger { inner })
    }

    /// Check if the stop signal has been triggered.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for either the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if timed out. Loops over spurious
    /// wakeups until the condition holds or the deadline passes.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let deadline = Instant::now() + duration;

        while !*stopped {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
        }
        true
    }

    /// Block until the signal is triggered.
    pub fn wait(&self) {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let _stopped = cvar
            .wait_while(guard, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

/// Trigger side of a stop flag. Triggering is idempotent.
#[derive(Debug, Clone)]
pub struct StopTrigger {
    inner: Shared,
}

impl StopTrigger {
    /// Set the flag and wake every waiter.
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }

    /// A new observer for this trigger's flag.
    #[must_use]
    pub fn signal(&self) -> StopSignal {
        StopSignal {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_unstopped() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.is_stopped());
        assert!(!signal.wait_timeout(Duration::from_millis(5)));
    }

    #[test]
    fn trigger_is_seen_by_all_clones() {
        let (signal, trigger) = StopSignal::new();
        let other = signal.clone();
        let third = trigger.signal();
        trigger.stop();
        assert!(signal.is_stopped());
        assert!(other.is_stopped());
        assert!(third.is_stopped());
        assert!(signal.wait_timeout(Duration::from_secs(1)));
    }

    #[test]
    fn wakes_a_blocked_waiter() {
        let (signal, trigger) = StopSignal::new();
        let waiter = thread::spawn(move || signal.wait_timeout(Duration::from_secs(10)));
        thread::sleep(Duration::from_millis(10));
        trigger.stop();
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn wait_returns_after_stop() {
        let (signal, trigger) = StopSignal::new();
        let waiter = thread::spawn(move || signal.wait());
        trigger.stop();
        waiter.join().unwrap();
    }
}
