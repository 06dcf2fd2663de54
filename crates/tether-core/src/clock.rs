use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

/// Time source for timers and throttling. The runtime never reads the wall
/// clock directly, so tests can drive it deterministically.
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock you advance by hand. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    origin: Instant,
    t: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            t: Rc::new(Cell::new(origin)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }

    /// Jump to `elapsed` after the origin. Never moves backwards.
    pub fn set_elapsed(&self, elapsed: Duration) {
        let target = self.origin + elapsed;
        if target > self.t.get() {
            self.t.set(target);
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.t.get().saturating_duration_since(self.origin)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}
