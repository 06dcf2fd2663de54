pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::deps;
pub use crate::deps::{Callback, DependencySet};
pub use crate::effects::{Dispose, on_unmount};
pub use crate::effects_ext::{bind_effect, memo_child, use_callback, use_memo};
pub use crate::error::StorageError;
pub use crate::events::{Event, GlobalEvents, KEYDOWN, Key, KeyEvent, Listener};
pub use crate::locals::{provide, use_context};
pub use crate::pacing::{Debounce, Throttle, use_debounce, use_debounced, use_throttle};
pub use crate::runtime::{
    Runtime, RuntimeHandle, current_runtime, remember, remember_with_key, set_timeout,
    use_runtime, use_state, use_state_with_key,
};
pub use crate::scope::{Scope, current_scope};
pub use crate::state::StateCell;
pub use crate::storage::{
    FileStore, KeyValueStore, MemoryStore, UnavailableStore, read_json, write_json,
};
pub use crate::timer::TimerHandle;
pub use web_time::{Duration, Instant};
