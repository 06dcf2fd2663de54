//! # Context
//!
//! Composition locals: values provided for everything composed inside a
//! closure, looked up by type. A provider pushes a frame, runs its children,
//! and pops the frame again (also on unwind):
//!
//! ```rust
//! use tether_core::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Locale(&'static str);
//!
//! provide(Locale("en-GB"), || {
//!     assert_eq!(use_context::<Locale>(), Some(Locale("en-GB")));
//!     provide(Locale("fr-FR"), || {
//!         assert_eq!(use_context::<Locale>(), Some(Locale("fr-FR")));
//!     });
//! });
//! assert_eq!(use_context::<Locale>(), None);
//! ```
//!
//! Locals are only visible while the providing closure runs. Effects execute
//! after the render pass, so capture what they need during render.

use std::any::{Any, TypeId};
use std::cell::RefCell;

type Frame = (TypeId, Box<dyn Any>);

thread_local! {
    static PROVIDED: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Pops the frame pushed by [`provide`], also on unwind.
struct Pop;

impl Drop for Pop {
    fn drop(&mut self) {
        PROVIDED.with(|frames| frames.borrow_mut().pop());
    }
}

/// Provide `value` to everything composed inside `f`.
pub fn provide<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    PROVIDED.with(|frames| {
        frames
            .borrow_mut()
            .push((TypeId::of::<T>(), Box::new(value)))
    });
    let _pop = Pop;
    f()
}

/// Nearest provided value of type `T`, if any.
pub fn use_context<T: Clone + 'static>() -> Option<T> {
    let wanted = TypeId::of::<T>();
    PROVIDED.with(|frames| {
        frames
            .borrow()
            .iter()
            .rev()
            .filter(|(id, _)| *id == wanted)
            .find_map(|(_, v)| v.downcast_ref::<T>().cloned())
    })
}
