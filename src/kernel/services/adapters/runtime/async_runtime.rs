use super::message::{NavigatorMessage, SearchBoxId};
use rustc_hash::FxHashMap;
use std::io;
use std::sync::mpsc::Sender;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Handle to one armed debounce timer.
pub struct TimerHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Aborts the timer. No-op when it already fired or was cancelled.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Owns the tokio runtime that backs search box timers. Elapsed timers are
/// reported on the event loop's channel; state never leaves that loop.
pub struct SearchRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<NavigatorMessage>,
    timers: FxHashMap<SearchBoxId, TimerHandle>,
}

impl SearchRuntime {
    pub fn new(tx: Sender<NavigatorMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("navigator-timer")
            .enable_time()
            .build()?;
        Ok(Self {
            runtime,
            tx,
            timers: FxHashMap::default(),
        })
    }

    /// Arms the timer of `box_id`, replacing (and aborting) any timer it had.
    pub fn arm_debounce(&mut self, box_id: SearchBoxId, generation: u64, deadline: Instant) {
        let tx = self.tx.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
            if tx
                .send(NavigatorMessage::DebounceElapsed { box_id, generation })
                .is_err()
            {
                tracing::trace!(generation, "debounce receiver dropped");
            }
        });

        if let Some(previous) = self.timers.insert(box_id, TimerHandle { generation, task }) {
            previous.cancel();
        }
    }

    /// Returns whether a still-running timer was aborted.
    pub fn cancel_debounce(&mut self, box_id: SearchBoxId) -> bool {
        let Some(timer) = self.timers.remove(&box_id) else {
            return false;
        };
        let was_running = !timer.is_finished();
        timer.cancel();
        was_running
    }

    pub fn armed_generation(&self, box_id: SearchBoxId) -> Option<u64> {
        self.timers
            .get(&box_id)
            .filter(|t| !t.is_finished())
            .map(|t| t.generation())
    }
}

impl Drop for SearchRuntime {
    fn drop(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.cancel();
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
