//! Millisecond clocks for the deadline timers
//!
//! Recovery and press feedback are deadlines compared against a [`Clock`],
//! never sleeping threads. [`ManualClock`] makes them deterministic in tests
//! and lets the browser feed its own `performance.now()` timestamps.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of monotonic milliseconds
pub trait Clock: Debug {
    /// Milliseconds elapsed since the clock's origin
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is now
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep a handle while a session
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock at 0 ms
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock at `ms`
    #[must_use]
    pub fn starting_at(ms: u64) -> Self {
        Self {
            current_ms: Arc::new(AtomicU64::new(ms)),
        }
    }

    /// Moves time forward
    pub fn advance(&self, by: Duration) {
        self.advance_ms(u64::try_from(by.as_millis()).unwrap_or(u64::MAX));
    }

    /// Moves time forward by `ms` milliseconds
    pub fn advance_ms(&self, ms: u64) {
        let _ = self
            .current_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| {
                Some(t.saturating_add(ms))
            });
    }

    /// Jumps to an absolute time; going backwards is ignored
    pub fn set_ms(&self, ms: u64) {
        self.current_ms.fetch_max(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.load(Ordering::SeqCst)
    }
}
