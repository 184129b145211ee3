use core::sync::atomic::{AtomicU64, Ordering};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::Timestamp;

/// Time source for seeds, move timestamps and elapsed time.
pub trait Clock {
    fn now_millis(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> Timestamp {
        (**self).now_millis()
    }
}

/// Wall clock, works on wasm as well.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> Timestamp {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis().try_into().unwrap_or(Timestamp::MAX),
            Err(_) => {
                log::warn!("System clock is set before the Unix epoch");
                0
            }
        }
    }
}

/// Deterministic clock: every read returns the current value and then advances it by `step`.
#[derive(Debug, Default)]
pub struct SteppingClock {
    next: AtomicU64,
    step: Timestamp,
}

impl SteppingClock {
    pub const fn new(start: Timestamp, step: Timestamp) -> Self {
        Self {
            next: AtomicU64::new(start),
            step,
        }
    }

    /// A clock that never moves.
    pub const fn fixed(at: Timestamp) -> Self {
        Self::new(at, 0)
    }

    /// Value the next read will return.
    pub fn peek(&self) -> Timestamp {
        self.next.load(Ordering::Relaxed)
    }

    pub fn advance(&self, by: Timestamp) {
        self.next.fetch_add(by, Ordering::Relaxed);
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> Timestamp {
        self.next.fetch_add(self.step, Ordering::Relaxed)
    }
}
