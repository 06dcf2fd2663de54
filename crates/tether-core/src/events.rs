use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Escape,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
}

pub const KEYDOWN: &str = "keydown";

/// Event handler; identity is the `Rc` allocation, so keep the same
/// `Listener` to remove what you added.
pub struct Listener(Rc<dyn Fn(&Event)>);

impl Listener {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }
}

impl Clone for Listener {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

new_key_type! {
    pub struct ListenerId;
}

struct Registered {
    name: String,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    listeners: SlotMap<ListenerId, Registered>,
    focused: Option<String>,
}

/// Window-level event target shared by every component. Clones share the
/// same registry.
#[derive(Clone, Default)]
pub struct GlobalEvents {
    inner: Rc<RefCell<Registry>>,
}

impl GlobalEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `listener` to `name`. Adding the same pair twice is a no-op
    /// and returns `false`.
    pub fn add_event_listener(&self, name: &str, listener: &Listener) -> bool {
        let mut reg = self.inner.borrow_mut();
        let exists = reg
            .listeners
            .values()
            .any(|r| r.name == name && r.listener == *listener);
        if exists {
            return false;
        }
        reg.listeners.insert(Registered {
            name: name.to_string(),
            listener: listener.clone(),
        });
        log::debug!("listener added for '{name}'");
        true
    }

    /// Returns `false` if the pair was not subscribed.
    pub fn remove_event_listener(&self, name: &str, listener: &Listener) -> bool {
        let mut reg = self.inner.borrow_mut();
        let id = reg
            .listeners
            .iter()
            .find(|(_, r)| r.name == name && r.listener == *listener)
            .map(|(id, _)| id);
        match id {
            Some(id) => {
                reg.listeners.remove(id);
                log::debug!("listener removed for '{name}'");
                true
            }
            None => false,
        }
    }

    /// Delivers `event` to every listener of `name`. Listeners may add or
    /// remove listeners while being called; the change applies to the next
    /// dispatch.
    pub fn dispatch(&self, name: &str, event: &Event) -> usize {
        let targets: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, r)| r.name == name)
            .map(|(_, r)| r.listener.clone())
            .collect();
        for listener in &targets {
            listener.call(event);
        }
        targets.len()
    }

    pub fn key_down(&self, key: Key) -> usize {
        self.dispatch(KEYDOWN, &Event::Key(KeyEvent::new(key)))
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .values()
            .filter(|r| r.name == name)
            .count()
    }

    pub fn request_focus(&self, target: impl Into<String>) {
        self.inner.borrow_mut().focused = Some(target.into());
    }

    pub fn focused(&self) -> Option<String> {
        self.inner.borrow().focused.clone()
    }
}
