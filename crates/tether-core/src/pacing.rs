//! Debounce and throttle.
//!
//! - **Debounce** waits for quiet: every call cancels the pending application
//!   and schedules a new one `window` later. Only the trailing call of a burst
//!   is applied.
//! - **Throttle** bounds frequency: a call is applied immediately if nothing
//!   has fired yet or at least `interval` has elapsed since the last firing;
//!   otherwise it is dropped, not queued. Leading calls win.

use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use web_time::{Duration, Instant};

use crate::deps;
use crate::effects::on_unmount;
use crate::effects_ext::bind_effect;
use crate::runtime::{RuntimeHandle, remember, set_timeout, use_runtime, use_state};
use crate::timer::TimerHandle;

pub struct Debounce<T: 'static> {
    runtime: RuntimeHandle,
    window: Duration,
    pending: RefCell<Option<TimerHandle>>,
    apply: Rc<dyn Fn(T)>,
}

impl<T: 'static> Debounce<T> {
    pub fn new(runtime: RuntimeHandle, window: Duration, apply: impl Fn(T) + 'static) -> Self {
        Self {
            runtime,
            window,
            pending: RefCell::new(None),
            apply: Rc::new(apply),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn call(&self, value: T) {
        self.cancel();
        let apply = self.apply.clone();
        let handle = self.runtime.set_timeout(self.window, move || apply(value));
        *self.pending.borrow_mut() = Some(handle);
    }

    /// Drops the pending application, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        let pending = self.pending.borrow_mut().take();
        pending.is_some_and(|h| h.cancel())
    }
}

#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_fired: Cell<Option<Instant>>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: Cell::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records a firing at `now` and returns `true` if the call is admitted.
    pub fn admit(&self, now: Instant) -> bool {
        let admitted = match self.last_fired.get() {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if admitted {
            self.last_fired.set(Some(now));
        }
        admitted
    }

    pub fn call<T>(&self, now: Instant, value: T, apply: impl FnOnce(T)) -> bool {
        let admitted = self.admit(now);
        if admitted {
            apply(value);
        }
        admitted
    }
}

/// Trails `value` by `window`: returns the last value that stayed unchanged
/// for a full window. Starts out equal to `value`.
pub fn use_debounced<T>(value: T, window: Duration) -> T
where
    T: Clone + PartialEq + Debug + 'static,
{
    let debounced = use_state(|| value.clone());

    bind_effect(deps![value.clone()], {
        let debounced = debounced.clone();
        move || {
            let timer = set_timeout(window, move || debounced.set(value));
            on_unmount(move || {
                timer.cancel();
            })
        }
    });

    debounced.get()
}

/// A throttle kept across passes.
pub fn use_throttle(interval: Duration) -> Rc<Throttle> {
    remember(|| Throttle::new(interval))
}

/// Stable [`Debounce`] for use in event handlers. The pending application is
/// cancelled when the scope is disposed.
pub fn use_debounce<T: 'static>(window: Duration, apply: impl Fn(T) + 'static) -> Rc<Debounce<T>> {
    let runtime = use_runtime();
    let debounce = remember(move || Debounce::new(runtime, window, apply));
    bind_effect(deps![], {
        let debounce = debounce.clone();
        move || {
            on_unmount(move || {
                debounce.cancel();
            })
        }
    });
    debounce
}
