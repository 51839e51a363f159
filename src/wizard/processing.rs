use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

// ── Status playback ─────────────────────────────────────────────────

/// The six status messages played back while an analysis "runs", in
/// display order.
pub static STATUS_MESSAGES: [&str; 6] = [
    "Processing natural language...",
    "Analyzing sentiment patterns...",
    "Evaluating aspect scores...",
    "Detecting emotions...",
    "Generating recommendations...",
    "Finalizing results...",
];

/// One status message per second, matching the presentation cadence.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What a single tick produced: either the next status update, or the
/// signal that the playback is over and the result should be synthesized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingAdvance {
    Status {
        message: &'static str,
        progress_percent: f64,
    },
    Finished,
}

/// Pure tick counter for the processing step. Ticks 1 through 6 surface
/// the status messages; the last message stays on screen for one more
/// tick before the seventh reports `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingPhase {
    ticks: u32,
}

impl ProcessingPhase {
    pub fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Consume one tick and report what it produced.
    pub fn advance(&mut self) -> ProcessingAdvance {
        self.ticks += 1;
        let count = STATUS_MESSAGES.len() as u32;
        if self.ticks <= count {
            let index = (self.ticks - 1) as usize;
            ProcessingAdvance::Status {
                message: STATUS_MESSAGES[index],
                progress_percent: self.ticks as f64 / count as f64 * 100.0,
            }
        } else {
            ProcessingAdvance::Finished
        }
    }
}

// ── Ticker task ─────────────────────────────────────────────────────

/// A cancellable repeating timer. Sends a copy of `tick` on `tx` once
/// per interval until cancelled or the receiver goes away. Dropping the
/// handle aborts the task, so replacing a session's ticker is enough to
/// silence the old one.
pub struct ProcessingTicker {
    handle: JoinHandle<()>,
}

impl ProcessingTicker {
    pub fn spawn<T>(interval: Duration, tx: mpsc::UnboundedSender<T>, tick: T) -> Self
    where
        T: Clone + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            // interval fires immediately; swallow that so the first
            // status lands one full interval after spawn
            timer.tick().await;
            loop {
                timer.tick().await;
                if tx.send(tick.clone()).is_err() {
                    debug!("Ticker receiver gone, stopping");
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Stop the timer. Ticks already queued on the channel may still be
    /// delivered; the session state machine ignores them.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for ProcessingTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ── Tests ───────────────────────────────────────────────────────────
