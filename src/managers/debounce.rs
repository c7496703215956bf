//! Debounce scheduler for URLForge.
//!
//! Typing events are coalesced so a recompute runs at most once per window of
//! input inactivity per input stream. The timer state is held as plain values
//! here and driven externally by the UI event loop; there is no background
//! thread. Replacing a pending deadline on new input is the entire
//! cancellation model.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Inactivity window before a pending recompute fires.
pub const DEBOUNCE_MS: u64 = 300;

/// Trait defining the debounce scheduling interface.
pub trait DebounceSchedulerTrait {
    fn note_input(&mut self, stream: &str, now: Instant);
    fn cancel(&mut self, stream: &str) -> bool;
    fn drain_due(&mut self, now: Instant) -> Vec<String>;
    fn next_deadline(&self) -> Option<Instant>;
    fn is_pending(&self, stream: &str) -> bool;
    fn pending_count(&self) -> usize;
}

/// One pending deadline per independent input stream.
///
/// Each input element on the form is its own stream, so editing two fields
/// "simultaneously" produces two independently timed recompute cycles. Every
/// cycle re-reads the whole current state, so firing order does not matter.
pub struct DebounceScheduler {
    window: Duration,
    pending: HashMap<String, Instant>,
}

impl DebounceScheduler {
    /// Creates a scheduler with the standard window.
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(DEBOUNCE_MS))
    }

    /// Creates a scheduler with a custom window (used by tests).
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DebounceSchedulerTrait for DebounceScheduler {
    /// Record input on a stream: any pending deadline for that stream is
    /// replaced with `now + window`.
    fn note_input(&mut self, stream: &str, now: Instant) {
        self.pending.insert(stream.to_string(), now + self.window);
    }

    /// Drop the pending deadline for a stream, if any. Returns whether one
    /// was pending.
    fn cancel(&mut self, stream: &str) -> bool {
        self.pending.remove(stream).is_some()
    }

    /// Remove and return all streams whose deadline has elapsed at `now`.
    ///
    /// Sorted so firing order is deterministic; callers recompute over the
    /// full current state either way.
    fn drain_due(&mut self, now: Instant) -> Vec<String> {
        let mut due: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(stream, _)| stream.clone())
            .collect();
        for stream in &due {
            self.pending.remove(stream);
        }
        due.sort();
        due
    }

    /// The earliest pending deadline, used to drive the event loop's wakeup.
    fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    fn is_pending(&self, stream: &str) -> bool {
        self.pending.contains_key(stream)
    }

    fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
