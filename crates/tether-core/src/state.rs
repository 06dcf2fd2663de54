use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::runtime::{PendingUpdate, RuntimeInner};

type Update<T> = Box<dyn FnOnce(&T) -> T>;

/// The unit of render-driving state.
///
/// Reads return the value committed by the last render pass. Writes are
/// queued and applied at the start of the next pass, so code that runs right
/// after `set` in the same turn still reads the old value.
///
/// Clones are handles to the same cell; equality is identity.
pub struct StateCell<T: 'static> {
    inner: Rc<CellInner<T>>,
}

struct CellInner<T: 'static> {
    value: RefCell<T>,
    queued: RefCell<Vec<Update<T>>>,
    revision: Cell<u64>,
    runtime: Weak<RuntimeInner>,
}

impl<T: 'static> StateCell<T> {
    pub(crate) fn attached(value: T, runtime: Weak<RuntimeInner>) -> Self {
        Self {
            inner: Rc::new(CellInner {
                value: RefCell::new(value),
                queued: RefCell::new(Vec::new()),
                revision: Cell::new(0),
                runtime,
            }),
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.value.borrow()
    }

    /// Number of writes applied so far. Starts at 0.
    pub fn revision(&self) -> u64 {
        self.inner.revision.get()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.queued.borrow().is_empty()
    }

    pub fn set(&self, next: T) {
        self.update(move |_| next);
    }

    /// Queues a functional update. Updates queued in the same turn chain:
    /// each one receives the result of the one before it.
    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        let Some(rt) = self.inner.runtime.upgrade() else {
            log::debug!("write to a state cell whose runtime is gone; ignoring");
            return;
        };
        let first = {
            let mut queued = self.inner.queued.borrow_mut();
            queued.push(Box::new(f));
            queued.len() == 1
        };
        if first {
            rt.enqueue(self.inner.clone());
        }
    }
}

impl<T: 'static> PendingUpdate for CellInner<T> {
    fn apply(&self) -> usize {
        let updates = std::mem::take(&mut *self.queued.borrow_mut());
        let applied = updates.len();
        for f in updates {
            let next = f(&self.value.borrow());
            *self.value.borrow_mut() = next;
            self.revision.set(self.revision.get() + 1);
        }
        applied
    }
}

impl<T: 'static> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> PartialEq for StateCell<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: 'static> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("revision", &self.revision())
            .field("pending", &self.inner.queued.borrow().len())
            .finish()
    }
}
