//! Search box input debounce.
//!
//! Every edit re-arms a single deadline. Hosts either poll the deadline from
//! their tick loop (`poll`) or arm an external timer and report back with the
//! generation it was armed for (`fire`). Both paths emit the settled query at
//! most once per quiescent period.

use crate::kernel::services::ports::config::{ConfigError, SearchBoxDebounceOptions};
use std::time::{Duration, Instant};

const OVERSHOOT_LOG_THRESHOLD: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingEmit {
    generation: u64,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct SearchBoxDebounce {
    delay: Duration,
    query: String,
    pending: Option<PendingEmit>,
    generation: u64,
    last_emitted: Option<String>,
}

impl SearchBoxDebounce {
    pub fn new(options: SearchBoxDebounceOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            delay: options.delay(),
            query: String::new(),
            pending: None,
            generation: 0,
            last_emitted: None,
        })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Generation of the most recently armed deadline.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_emitted(&self) -> Option<&str> {
        self.last_emitted.as_deref()
    }

    /// Appends `ch` and re-arms. Returns the new deadline.
    pub fn append(&mut self, ch: char, now: Instant) -> Instant {
        self.query.push(ch);
        self.arm(now)
    }

    /// Removes the last char. Nothing is re-armed when the buffer was empty.
    pub fn backspace(&mut self, now: Instant) -> Option<Instant> {
        self.query.pop()?;
        Some(self.arm(now))
    }

    /// Drops the pending emission, if any. Returns whether one was dropped.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            tracing::trace!(generation = self.generation, "search debounce cancelled");
        }
        cancelled
    }

    pub fn clear(&mut self) {
        self.cancel();
        self.query.clear();
    }

    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        Some(self.emit(pending, now))
    }

    /// Timer callback path. Only the currently armed generation emits.
    pub fn fire(&mut self, generation: u64, now: Instant) -> Option<String> {
        let pending = self.pending?;
        if pending.generation != generation {
            tracing::trace!(
                generation,
                current = pending.generation,
                "stale search debounce timer ignored"
            );
            return None;
        }
        Some(self.emit(pending, now))
    }

    fn arm(&mut self, now: Instant) -> Instant {
        self.generation = self.generation.wrapping_add(1);
        let deadline = now + self.delay;
        self.pending = Some(PendingEmit {
            generation: self.generation,
            deadline,
        });
        deadline
    }

    fn emit(&mut self, pending: PendingEmit, now: Instant) -> String {
        let overshoot = now.saturating_duration_since(pending.deadline);
        if overshoot > OVERSHOOT_LOG_THRESHOLD {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "search debounce overshoot"
            );
        }

        self.pending = None;
        let query = self.query.clone();
        self.last_emitted = Some(query.clone());
        query
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/debounce.rs"]
mod tests;
