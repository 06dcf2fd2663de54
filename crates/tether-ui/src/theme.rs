use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tether_core::*;

/// Store entry holding the theme name as plain text.
pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Button caption naming the mode a toggle switches to.
    pub fn toggle_label(self) -> &'static str {
        match self.toggled() {
            ThemeMode::Light => "Switch theme to Light Mode",
            ThemeMode::Dark => "Switch theme to Dark Mode",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class attribute of the document body. Clones share it.
#[derive(Clone, Debug, Default)]
pub struct BodyClass(Rc<RefCell<String>>);

impl BodyClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn set(&self, class: &str) {
        let mut current = self.0.borrow_mut();
        current.clear();
        current.push_str(class);
    }
}

#[derive(Clone, Debug)]
pub struct ThemeContext {
    pub theme: ThemeMode,
    toggle_theme: Callback<()>,
}

impl ThemeContext {
    pub fn toggle(&self) {
        self.toggle_theme.call(());
    }
}

fn stored_theme(store: &dyn KeyValueStore) -> ThemeMode {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) if !raw.is_empty() => ThemeMode::parse(&raw).unwrap_or_else(|| {
            log::warn!("unknown stored theme {raw:?}, using light");
            ThemeMode::Light
        }),
        Ok(_) => ThemeMode::Light,
        Err(err) => {
            log::error!("error reading stored theme: {err}");
            ThemeMode::Light
        }
    }
}

/// Owns the theme, keeps `body` in sync with it, and provides a
/// [`ThemeContext`] to `children`. Toggling persists the new theme right
/// away.
pub fn ThemeProvider<R>(
    store: Rc<dyn KeyValueStore>,
    body: &BodyClass,
    children: impl FnOnce() -> R,
) -> R {
    let theme = use_state(|| stored_theme(&*store));
    let current = theme.get();

    bind_effect(deps![current], {
        let body = body.clone();
        move || {
            body.set(current.as_str());
            Dispose::none()
        }
    });

    let toggle_theme = Callback::new(move |()| {
        let next = current.toggled();
        theme.set(next);
        if let Err(err) = store.set(THEME_KEY, next.as_str()) {
            log::error!("error saving theme: {err}");
        }
    });

    provide(
        ThemeContext {
            theme: current,
            toggle_theme,
        },
        children,
    )
}

/// # Panics
///
/// Outside a [`ThemeProvider`].
pub fn use_theme() -> ThemeContext {
    match use_context::<ThemeContext>() {
        Some(ctx) => ctx,
        None => panic!("use_theme must be called inside a ThemeProvider"),
    }
}

#[derive(Clone, Debug)]
pub struct ThemeToggleButtonView {
    pub label: &'static str,
    ctx: ThemeContext,
}

impl ThemeToggleButtonView {
    pub fn click(&self) {
        self.ctx.toggle();
    }
}

pub fn ThemeToggleButton() -> ThemeToggleButtonView {
    let ctx = use_theme();
    ThemeToggleButtonView {
        label: ctx.theme.toggle_label(),
        ctx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(store: &MemoryStore) -> Option<String> {
        store.get(THEME_KEY).unwrap()
    }

    #[test]
    fn test_toggle_round_trip() {
        let store = Rc::new(MemoryStore::new());
        let body = BodyClass::new();
        let rt = Runtime::new();
        let app = || ThemeProvider(store.clone(), &body, ThemeToggleButton);

        let button = rt.render(app);
        assert_eq!(button.label, "Switch theme to Dark Mode");
        assert_eq!(body.get(), "light");
        assert_eq!(stored(&store), None);

        button.click();
        assert_eq!(stored(&store).as_deref(), Some("dark"));
        let button = rt.render(app);
        assert_eq!(button.label, "Switch theme to Light Mode");
        assert_eq!(body.get(), "dark");

        button.click();
        let button = rt.render(app);
        assert_eq!(stored(&store).as_deref(), Some("light"));
        assert_eq!(body.get(), "light");
        assert_eq!(button.label, "Switch theme to Dark Mode");
    }

    #[test]
    fn test_initial_theme_from_store() {
        let store = Rc::new(MemoryStore::new());
        store.set(THEME_KEY, "dark").unwrap();
        let body = BodyClass::new();
        let rt = Runtime::new();

        let theme = rt.render(|| ThemeProvider(store.clone(), &body, || use_theme().theme));
        assert_eq!(theme, ThemeMode::Dark);
        assert_eq!(body.get(), "dark");
    }

    #[test]
    fn test_unreadable_store_defaults_to_light() {
        let body = BodyClass::new();
        let rt = Runtime::new();
        let app = || ThemeProvider(Rc::new(UnavailableStore), &body, ThemeToggleButton);

        let button = rt.render(app);
        assert_eq!(body.get(), "light");

        // Saving fails too; the in-memory theme still switches.
        button.click();
        rt.render(app);
        assert_eq!(body.get(), "dark");
    }

    #[test]
    fn test_unknown_stored_value_defaults_to_light() {
        let store = Rc::new(MemoryStore::new());
        store.set(THEME_KEY, "solarized").unwrap();
        let body = BodyClass::new();
        let rt = Runtime::new();

        let theme = rt.render(|| ThemeProvider(store.clone(), &body, || use_theme().theme));
        assert_eq!(theme, ThemeMode::Light);
    }

    #[test]
    #[should_panic(expected = "inside a ThemeProvider")]
    fn test_button_outside_provider_panics() {
        Runtime::new().render(ThemeToggleButton);
    }
}
