//! Deadline for the error auto-clear

use std::time::Duration;

use tracing::debug;

use super::CalcError;

/// A scheduled recovery: which error, and when it clears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    error: CalcError,
    deadline_ms: u64,
}

/// Cancellable auto-clear timer
///
/// Holds at most one pending recovery. Scheduling again replaces the old
/// deadline.
#[derive(Debug, Clone)]
pub struct ErrorRecovery {
    delay: Duration,
    pending: Option<Pending>,
}

impl Default for ErrorRecovery {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl ErrorRecovery {
    /// Delay used by the browser widget
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    /// Creates an idle timer with the given delay
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Configured delay
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a recovery for `error`, returning its deadline
    pub fn schedule(&mut self, now_ms: u64, error: CalcError) -> u64 {
        let delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX);
        let deadline_ms = now_ms.saturating_add(delay_ms);
        if let Some(previous) = self.pending.replace(Pending { error, deadline_ms }) {
            debug!(
                superseded = previous.deadline_ms,
                deadline_ms, "recovery rescheduled"
            );
        }
        deadline_ms
    }

    /// Returns the error once its deadline has passed, disarming the timer
    pub fn poll(&mut self, now_ms: u64) -> Option<CalcError> {
        match self.pending {
            Some(pending) if now_ms >= pending.deadline_ms => {
                self.pending = None;
                Some(pending.error)
            }
            _ => None,
        }
    }

    /// Drops any pending recovery
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a recovery is scheduled
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending recovery
    #[must_use]
    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending.map(|p| p.deadline_ms)
    }

    /// Error awaiting recovery
    #[must_use]
    pub fn pending_error(&self) -> Option<CalcError> {
        self.pending.map(|p| p.error)
    }
}
