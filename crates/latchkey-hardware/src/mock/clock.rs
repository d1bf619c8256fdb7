//! Mock monotonic clock for testing and development.

use crate::traits::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Mock clock whose time only moves when the test advances it.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockClock;
/// use latchkey_hardware::traits::Clock;
///
/// let (clock, handle) = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// handle.advance(51);
/// assert_eq!(clock.now_ms(), 51);
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    now_ms: Arc<AtomicU64>,
}

impl MockClock {
    /// Create a new mock clock at t=0 and its controlling handle.
    pub fn new() -> (Self, MockClockHandle) {
        let now_ms = Arc::new(AtomicU64::new(0));
        let clock = Self {
            now_ms: Arc::clone(&now_ms),
        };
        let handle = MockClockHandle { now_ms };
        (clock, handle)
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Handle for advancing a [`MockClock`].
#[derive(Debug, Clone)]
pub struct MockClockHandle {
    now_ms: Arc<AtomicU64>,
}

impl MockClockHandle {
    /// Move time forward by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// The current mock time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
