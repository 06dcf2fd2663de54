use std::cell::{Cell, RefCell};
use std::rc::Weak;

use slotmap::{SlotMap, new_key_type};
use web_time::Instant;

use crate::runtime::RuntimeInner;

new_key_type! {
    pub struct TimerId;
}

struct Timer {
    deadline: Instant,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

/// One-shot timers ordered by deadline, then by scheduling order.
#[derive(Default)]
pub(crate) struct TimerQueue {
    timers: RefCell<SlotMap<TimerId, Timer>>,
    seq: Cell<u64>,
}

impl TimerQueue {
    pub(crate) fn schedule(&self, deadline: Instant, callback: Box<dyn FnOnce()>) -> TimerId {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().insert(Timer {
            deadline,
            seq,
            callback,
        })
    }

    pub(crate) fn cancel(&self, id: TimerId) -> bool {
        self.timers.borrow_mut().remove(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.timers.borrow().len()
    }

    pub(crate) fn clear(&self) {
        // Drop callbacks outside the borrow; they may own cells or handles.
        let drained: Vec<Timer> = self.timers.borrow_mut().drain().map(|(_, t)| t).collect();
        drop(drained);
    }

    fn pop_due(&self, now: Instant) -> Option<Timer> {
        let mut timers = self.timers.borrow_mut();
        let id = timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(id, _)| id)?;
        timers.remove(id)
    }

    /// Runs every timer due at `now`, each as its own turn. Callbacks may
    /// schedule or cancel timers; newly scheduled ones that are already due
    /// also run.
    pub(crate) fn fire_due(&self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.pop_due(now) {
            (timer.callback)();
            fired += 1;
        }
        fired
    }
}

/// Cancellation handle for a scheduled timer.
#[derive(Clone)]
pub struct TimerHandle {
    id: TimerId,
    runtime: Weak<RuntimeInner>,
}

impl TimerHandle {
    pub(crate) fn new(id: TimerId, runtime: Weak<RuntimeInner>) -> Self {
        Self { id, runtime }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&self) -> bool {
        match self.runtime.upgrade() {
            Some(rt) => rt.timers.cancel(self.id),
            None => false,
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TimerHandle").field(&self.id).finish()
    }
}
