use std::cell::RefCell;
use std::rc::{Rc, Weak};

thread_local! {
    static CURRENT_SCOPE: RefCell<Option<Weak<ScopeInner>>> = const { RefCell::new(None) };
}

/// Owner of teardown work. Effects bound during a render pass register their
/// cleanup here; disposing the scope is what "unmount" means.
///
/// Clones share the same disposer list. Whatever is still registered when the
/// last clone drops runs then.
#[derive(Clone, Default)]
pub struct Scope {
    inner: Rc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl ScopeInner {
    fn teardown(&self) -> usize {
        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        let n = disposers.len();
        for disposer in disposers {
            disposer();
        }
        n
    }
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with this scope as the target of [`current_scope`].
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        struct Restore(Option<Weak<ScopeInner>>);
        impl Drop for Restore {
            fn drop(&mut self) {
                let prev = self.0.take();
                CURRENT_SCOPE.with(|current| *current.borrow_mut() = prev);
            }
        }

        let prev = CURRENT_SCOPE.with(|current| {
            current
                .borrow_mut()
                .replace(Rc::downgrade(&self.inner))
        });
        let _restore = Restore(prev);
        f()
    }

    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    pub fn disposer_count(&self) -> usize {
        self.inner.disposers.borrow().len()
    }

    /// Runs every disposer in registration order. Disposers added while this
    /// runs wait for the next call.
    pub fn dispose(&self) -> usize {
        let n = self.inner.teardown();
        log::trace!("scope disposed {n} cleanup(s)");
        n
    }
}

pub fn current_scope() -> Option<Scope> {
    CURRENT_SCOPE.with(|current| {
        current
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Scope { inner })
    })
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        self.teardown();
    }
}
