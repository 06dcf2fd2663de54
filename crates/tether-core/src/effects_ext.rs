use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use crate::deps::{Callback, DependencySet};
use crate::effects::Dispose;
use crate::runtime::{child_slot, queue_effect, remember};
use crate::scope::current_scope;

#[derive(Default)]
struct EffectSlot {
    deps: RefCell<Option<DependencySet>>,
    cleanup: RefCell<Option<Dispose>>,
    installed: Cell<bool>,
}

impl EffectSlot {
    fn run_cleanup(&self) {
        let cleanup = self.cleanup.borrow_mut().take();
        if let Some(d) = cleanup {
            d.run();
        }
    }
}

/// Binds a side effect to `deps`.
///
/// The comparison happens now, during the render pass, and has no side
/// effects. If the set differs from the one captured when the effect last ran
/// (or this is the first pass), `run` is queued and executes after the pass
/// completes: the previous cleanup first, then `run`, whose returned
/// [`Dispose`] becomes the new cleanup. The last cleanup also runs when the
/// owning scope is disposed.
pub fn bind_effect(deps: DependencySet, run: impl FnOnce() -> Dispose + 'static) {
    let slot = remember(EffectSlot::default);

    // One unmount disposer per call-site.
    if !slot.installed.get() {
        slot.installed.set(true);
        if let Some(scope) = current_scope() {
            let slot = slot.clone();
            scope.add_disposer(move || slot.run_cleanup());
        }
    }

    if !deps.changed_from(slot.deps.borrow().as_ref()) {
        return;
    }

    queue_effect(Box::new(move || {
        slot.run_cleanup();
        log::trace!("effect running with deps {deps:?}");
        let cleanup = run();
        *slot.cleanup.borrow_mut() = Some(cleanup);
        *slot.deps.borrow_mut() = Some(deps);
    }));
}

/// Recomputes `compute` during the render pass only when `deps` changed.
pub fn use_memo<T: 'static>(deps: DependencySet, compute: impl FnOnce() -> T) -> Rc<T> {
    let slot = remember(|| RefCell::new(None::<(DependencySet, Rc<T>)>));
    if let Some((prev, value)) = slot.borrow().as_ref()
        && *prev == deps
    {
        return value.clone();
    }

    let value = Rc::new(compute());
    *slot.borrow_mut() = Some((deps, value.clone()));
    value
}

/// A callback whose identity survives re-renders until `deps` change.
pub fn use_callback<A: 'static, R: 'static>(
    deps: DependencySet,
    f: impl Fn(A) -> R + 'static,
) -> Callback<A, R> {
    (*use_memo(deps, move || Callback::new(f))).clone()
}

/// Renders a child through `render` only when its props changed since the
/// last pass; otherwise returns the cached output.
///
/// Children are keyed rather than slotted, so a skipped render does not
/// disturb the parent's slot order. Keys only need to be unique among the
/// children of one parent. A child not rendered in a pass loses its cache.
/// `render` must not call slot-based hooks.
pub fn memo_child<P, V>(key: impl Into<String>, props: P, render: impl FnOnce(&P) -> V) -> V
where
    P: PartialEq + Debug + 'static,
    V: Clone + 'static,
{
    let slot = child_slot(&key.into(), || RefCell::new(None::<(P, V)>));
    if let Some((prev, view)) = slot.borrow().as_ref()
        && *prev == props
    {
        return view.clone();
    }

    let view = render(&props);
    *slot.borrow_mut() = Some((props, view.clone()));
    view
}
