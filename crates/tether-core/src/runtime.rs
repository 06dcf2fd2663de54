use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::{Rc, Weak};

use web_time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::scope::Scope;
use crate::state::StateCell;
use crate::timer::{TimerHandle, TimerId, TimerQueue};

thread_local! {
    static CURRENT: RefCell<Option<Weak<RuntimeInner>>> = const { RefCell::new(None) };
}

/// A cell with queued writes waiting for the next render pass.
pub(crate) trait PendingUpdate {
    /// Applies every queued write; returns how many were applied.
    fn apply(&self) -> usize;
}

#[derive(Default)]
struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    keyed_slots: HashMap<String, Box<dyn Any>>,
    children: HashMap<String, Box<dyn Any>>,
    visited: HashSet<String>,
}

impl Composer {
    /// Drops cached children that the last pass did not visit.
    fn sweep_children(&mut self) -> usize {
        let before = self.children.len();
        let visited = std::mem::take(&mut self.visited);
        self.children.retain(|key, _| visited.contains(key));
        before - self.children.len()
    }
}

pub(crate) struct RuntimeInner {
    composer: RefCell<Composer>,
    pending: RefCell<Vec<Rc<dyn PendingUpdate>>>,
    effects: RefCell<VecDeque<Box<dyn FnOnce()>>>,
    pub(crate) timers: TimerQueue,
    clock: Rc<dyn Clock>,
    scope: Scope,
    passes: Cell<u64>,
    rendering: Cell<bool>,
}

impl RuntimeInner {
    pub(crate) fn enqueue(&self, update: Rc<dyn PendingUpdate>) {
        self.pending.borrow_mut().push(update);
    }

    pub(crate) fn now(&self) -> Instant {
        self.clock.now()
    }
}

/// Restores the previously current runtime on drop (also on unwind).
struct Enter(Option<Weak<RuntimeInner>>);

impl Enter {
    fn new(inner: &Rc<RuntimeInner>) -> Self {
        let prev = CURRENT.with(|c| c.borrow_mut().replace(Rc::downgrade(inner)));
        Enter(prev)
    }
}

impl Drop for Enter {
    fn drop(&mut self) {
        let prev = self.0.take();
        CURRENT.with(|c| *c.borrow_mut() = prev);
    }
}

/// Owns the state slots, pending writes, effect queue, timers and root scope
/// of one component tree.
///
/// A render pass has two phases:
/// 1. apply every write queued since the last pass;
/// 2. run the root closure (hooks compare dependencies and queue effects),
///    then run the queued effects in order.
///
/// Writes made by event handlers, timer callbacks or effects are not visible
/// until the next pass.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                composer: RefCell::new(Composer::default()),
                pending: RefCell::new(Vec::new()),
                effects: RefCell::new(VecDeque::new()),
                timers: TimerQueue::default(),
                clock,
                scope: Scope::new(),
                passes: Cell::new(0),
                rendering: Cell::new(false),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    /// A cell owned by this runtime but created outside a render pass.
    pub fn cell<T: 'static>(&self, value: T) -> StateCell<T> {
        StateCell::attached(value, Rc::downgrade(&self.inner))
    }

    pub fn render<R>(&self, root: impl FnOnce() -> R) -> R {
        assert!(
            !self.inner.rendering.get(),
            "Runtime::render called from inside a render pass"
        );

        let applied = self.flush_pending();

        let _enter = Enter::new(&self.inner);
        {
            let mut c = self.inner.composer.borrow_mut();
            c.cursor = 0;
            c.visited.clear();
        }
        let out = {
            struct Done<'a>(&'a Cell<bool>);
            impl Drop for Done<'_> {
                fn drop(&mut self) {
                    self.0.set(false);
                }
            }
            self.inner.rendering.set(true);
            let _done = Done(&self.inner.rendering);
            self.inner.scope.run(root)
        };

        let evicted = self.inner.composer.borrow_mut().sweep_children();
        if evicted > 0 {
            log::trace!("evicted {evicted} cached child(ren)");
        }

        let ran = self.run_effects();
        let pass = self.inner.passes.get() + 1;
        self.inner.passes.set(pass);
        log::trace!("render pass {pass}: {applied} update(s) applied, {ran} effect(s) run");
        out
    }

    fn flush_pending(&self) -> usize {
        let pending = std::mem::take(&mut *self.inner.pending.borrow_mut());
        pending.iter().map(|p| p.apply()).sum()
    }

    fn run_effects(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.inner.effects.borrow_mut().pop_front();
            match next {
                Some(effect) => {
                    effect();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }

    /// True when some cell has writes that the next pass would apply.
    pub fn needs_render(&self) -> bool {
        !self.inner.pending.borrow().is_empty()
    }

    /// Fires every timer whose deadline has passed. Returns how many fired.
    pub fn tick(&self) -> usize {
        let _enter = Enter::new(&self.inner);
        self.inner.timers.fire_due(self.inner.now())
    }

    pub fn now(&self) -> Instant {
        self.inner.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.timers.len()
    }

    /// Number of memoized children cached from the last pass.
    pub fn cached_children(&self) -> usize {
        self.inner.composer.borrow().children.len()
    }

    pub fn passes(&self) -> u64 {
        self.inner.passes.get()
    }

    pub fn scope(&self) -> &Scope {
        &self.inner.scope
    }

    /// Tears the tree down: every effect cleanup runs, pending timers are
    /// dropped, and later writes to this runtime's cells are ignored.
    pub fn unmount(self) {
        let _enter = Enter::new(&self.inner);
        self.inner.scope.dispose();
        self.inner.timers.clear();
        self.inner.pending.borrow_mut().clear();
        log::debug!("runtime unmounted after {} pass(es)", self.passes());
    }
}

/// Weak reference to a runtime, for handlers that outlive a render pass.
#[derive(Clone)]
pub struct RuntimeHandle(Weak<RuntimeInner>);

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn now(&self) -> Instant {
        match self.0.upgrade() {
            Some(rt) => rt.now(),
            None => Instant::now(),
        }
    }

    pub fn set_timeout(&self, delay: Duration, f: impl FnOnce() + 'static) -> TimerHandle {
        match self.0.upgrade() {
            Some(rt) => {
                let id = rt.timers.schedule(rt.now() + delay, Box::new(f));
                TimerHandle::new(id, self.0.clone())
            }
            None => {
                log::debug!("set_timeout on a dropped runtime; ignoring");
                TimerHandle::new(TimerId::default(), Weak::new())
            }
        }
    }
}

pub(crate) fn current() -> Option<Rc<RuntimeInner>> {
    CURRENT.with(|c| c.borrow().as_ref().and_then(Weak::upgrade))
}

fn rendering_runtime(hook: &str) -> Rc<RuntimeInner> {
    match current() {
        Some(rt) if rt.rendering.get() => rt,
        _ => panic!("{hook} must be called during Runtime::render"),
    }
}

pub fn current_runtime() -> Option<RuntimeHandle> {
    current().map(|rt| RuntimeHandle(Rc::downgrade(&rt)))
}

/// Handle to the runtime rendering this pass, for handlers that need its
/// clock or timers later.
pub fn use_runtime() -> RuntimeHandle {
    RuntimeHandle(Rc::downgrade(&rendering_runtime("use_runtime")))
}

/// Schedules `f` on the current runtime's timer queue.
pub fn set_timeout(delay: Duration, f: impl FnOnce() + 'static) -> TimerHandle {
    match current_runtime() {
        Some(handle) => handle.set_timeout(delay, f),
        None => panic!("set_timeout must be called while a runtime is active"),
    }
}

pub(crate) fn queue_effect(effect: Box<dyn FnOnce()>) {
    let rt = rendering_runtime("bind_effect");
    rt.effects.borrow_mut().push_back(effect);
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let rt = rendering_runtime("remember");
    let cursor = {
        let mut c = rt.composer.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;
        if let Some(slot) = c.slots.get(cursor) {
            if let Some(rc) = slot.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
        }
        cursor
    };

    let rc: Rc<T> = Rc::new(init());
    let mut c = rt.composer.borrow_mut();
    if cursor < c.slots.len() {
        c.slots[cursor] = Box::new(rc.clone());
    } else {
        c.slots.push(Box::new(rc.clone()));
    }
    rc
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let rt = rendering_runtime("remember_with_key");
    let key = key.into();
    {
        let c = rt.composer.borrow();
        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!(
                "remember_with_key: key '{}' reused with a different type; replacing.",
                key
            );
        }
    }

    let rc: Rc<T> = Rc::new(init());
    rt.composer
        .borrow_mut()
        .keyed_slots
        .insert(key, Box::new(rc.clone()));
    rc
}

/// Cache entry for a memoized child. The key is scoped to the parent's slot
/// position, so equal keys under different parents do not collide. Entries not
/// reached in a pass are dropped when it ends.
pub(crate) fn child_slot<T: 'static>(key: &str, init: impl FnOnce() -> T) -> Rc<T> {
    let rt = rendering_runtime("memo_child");
    let mut c = rt.composer.borrow_mut();
    let key = format!("{}/{key}", c.cursor);
    if !c.visited.insert(key.clone()) {
        log::warn!("memo_child: key '{key}' used twice in one pass");
    }
    if let Some(rc) = c.children.get(&key).and_then(|b| b.downcast_ref::<Rc<T>>()) {
        return rc.clone();
    }

    let rc: Rc<T> = Rc::new(init());
    c.children.insert(key, Box::new(rc.clone()));
    rc
}

/// A state cell kept across passes. `init` runs once, on the first pass.
pub fn use_state<T: 'static>(init: impl FnOnce() -> T) -> StateCell<T> {
    let runtime = Rc::downgrade(&rendering_runtime("use_state"));
    let cell = remember(move || StateCell::attached(init(), runtime));
    (*cell).clone()
}

pub fn use_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> StateCell<T> {
    let runtime = Rc::downgrade(&rendering_runtime("use_state_with_key"));
    let cell = remember_with_key(key, move || StateCell::attached(init(), runtime));
    (*cell).clone()
}
