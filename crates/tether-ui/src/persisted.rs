//! State mirrored into a [`KeyValueStore`].
//!
//! The stored entry is read once, when the cell is created; a missing, empty
//! or unreadable entry falls back to the initial value. After every pass in
//! which the key or the value changed, an effect writes the value back as
//! JSON. Store failures are logged and never reach the caller: the in-memory
//! value stays authoritative.

use std::fmt::Debug;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tether_core::*;

pub fn use_persisted_state<T>(
    store: Rc<dyn KeyValueStore>,
    key: &str,
    initial: impl FnOnce() -> T,
) -> StateCell<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Debug + 'static,
{
    let cell = use_state(|| match read_json::<T>(&*store, key) {
        Ok(Some(value)) => value,
        Ok(None) => initial(),
        Err(err) => {
            log::error!("error reading stored value for {key:?}: {err}");
            initial()
        }
    });

    let key = key.to_string();
    let value = cell.get();
    bind_effect(deps![key.clone(), value.clone()], move || {
        log::debug!("writing {key:?} = {value:?}");
        if let Err(err) = write_json(&*store, &key, &value) {
            log::error!("error updating stored value for {key:?}: {err}");
        }
        Dispose::none()
    });

    cell
}

/// The two storage areas a host offers: `local` outlives the process,
/// `session` does not.
#[derive(Clone)]
pub struct StorageAreas {
    pub local: Rc<dyn KeyValueStore>,
    pub session: Rc<dyn KeyValueStore>,
}

impl StorageAreas {
    pub fn new(local: Rc<dyn KeyValueStore>, session: Rc<dyn KeyValueStore>) -> Self {
        Self { local, session }
    }

    /// Both areas in memory.
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()), Rc::new(MemoryStore::new()))
    }
}

/// Makes `areas` visible to the storage hooks composed inside `f`.
pub fn provide_storage<R>(areas: StorageAreas, f: impl FnOnce() -> R) -> R {
    provide(areas, f)
}

fn storage_area(
    which: &str,
    pick: impl FnOnce(StorageAreas) -> Rc<dyn KeyValueStore>,
) -> Rc<dyn KeyValueStore> {
    match use_context::<StorageAreas>() {
        Some(areas) => pick(areas),
        None => {
            log::warn!("no storage provided; {which} storage is unavailable");
            Rc::new(UnavailableStore)
        }
    }
}

pub fn use_local_storage<T>(key: &str, initial: impl FnOnce() -> T) -> StateCell<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Debug + 'static,
{
    use_persisted_state(storage_area("local", |a| a.local), key, initial)
}

pub fn use_session_storage<T>(key: &str, initial: impl FnOnce() -> T) -> StateCell<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Debug + 'static,
{
    use_persisted_state(storage_area("session", |a| a.session), key, initial)
}

pub const NAME_KEY: &str = "name";
pub const DEFAULT_NAME: &str = "Deepika";

#[derive(Clone, Debug)]
pub struct StoredNameView {
    pub name: String,
    on_input: Callback<String>,
}

impl StoredNameView {
    pub fn input(&self, value: impl Into<String>) {
        self.on_input.call(value.into());
    }
}

/// A text input whose value lives in local storage under `"name"`.
pub fn StoredName() -> StoredNameView {
    let name = use_local_storage(NAME_KEY, || DEFAULT_NAME.to_string());
    StoredNameView {
        name: name.get(),
        on_input: Callback::new(move |value: String| name.set(value)),
    }
}
