//! # State cells, effects and external resources
//!
//! Tether is a small single-threaded reactive core. A component is a closure
//! run inside [`Runtime::render`]; it reads its state, binds effects that keep
//! external resources (stores, timers, listeners) in sync with that state,
//! and returns a view model. There are four main pieces:
//!
//! - [`StateCell<T>`] — render-driving state with a deferred setter.
//! - `remember*` / [`use_state`] — slots that survive from one pass to the next.
//! - [`bind_effect`] — side effects keyed by a [`DependencySet`], with cleanup.
//! - [`use_memo`] / [`use_callback`] / [`memo_child`] — derived values and
//!   stable identities.
//!
//! ## State cells
//!
//! Writes are queued and applied at the start of the next pass:
//!
//! ```rust
//! use tether_core::*;
//!
//! let rt = Runtime::new();
//! let count = rt.render(|| {
//!     let count = use_state(|| 0);
//!     count.set(1);
//!     count.update(|v| v + 1);
//!     assert_eq!(count.get(), 0); // still the committed value
//!     count
//! });
//!
//! rt.render(|| ());
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Effects and cleanup
//!
//! An effect runs after the first pass and after every pass in which its
//! dependencies changed; the previous cleanup always runs first:
//!
//! ```rust
//! use tether_core::*;
//!
//! let events = GlobalEvents::new();
//! let rt = Runtime::new();
//! let open = rt.cell(true);
//!
//! let app = || {
//!     let is_open = open.get();
//!     let events = events.clone();
//!     bind_effect(deps![is_open], move || {
//!         let listener = Listener::new(|_| {});
//!         if is_open {
//!             events.add_event_listener(KEYDOWN, &listener);
//!         }
//!         on_unmount(move || {
//!             events.remove_event_listener(KEYDOWN, &listener);
//!         })
//!     });
//! };
//!
//! rt.render(app);
//! assert_eq!(events.listener_count(KEYDOWN), 1);
//!
//! open.set(false);
//! rt.render(app);
//! assert_eq!(events.listener_count(KEYDOWN), 0);
//! ```
//!
//! ## Timers
//!
//! Timers are owned by the runtime and fire on [`Runtime::tick`], driven by an
//! injected [`Clock`]. [`use_debounced`] and [`Throttle`] build the two
//! pacing policies on top.

pub mod clock;
pub mod deps;
pub mod effects;
pub mod effects_ext;
pub mod error;
pub mod events;
pub mod locals;
pub mod pacing;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod state;
pub mod storage;
pub mod timer;


pub use clock::*;
pub use deps::*;
pub use effects::*;
pub use effects_ext::*;
pub use error::*;
pub use events::*;
pub use locals::*;
pub use pacing::*;
pub use runtime::*;
pub use scope::*;
pub use state::*;
pub use storage::*;
pub use timer::{TimerHandle, TimerId};

pub use web_time::{Duration, Instant};
