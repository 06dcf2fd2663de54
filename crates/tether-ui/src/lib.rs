#![allow(non_snake_case)]
//! Demo components built on `tether-core`.
//!
//! Each component is a function called inside [`tether_core::Runtime::render`]
//! that returns a view model: the current values to show plus handler
//! callbacks for the host to invoke on user input. Handlers only queue
//! writes; call `render` again to see their effect.

pub mod contact_form;
pub mod filter;
pub mod memo_list;
pub mod overlay;
pub mod persisted;
pub mod reorder;
pub mod search;
pub mod theme;

use std::cell::RefCell;
use std::rc::Rc;

pub use contact_form::{
    ContactForm, ContactFormView, Field, FieldErrors, FormData, FormStatus, validate,
};
pub use filter::{FilterList, FilterListView, filter_items, fruits};
pub use memo_list::{Item, List, ListItem, ListItemProps, ListItemView, sample_people};
pub use overlay::{MODAL_CONTENT, Modal, ModalProps, ModalView, OverlayApp, OverlayAppView};
pub use persisted::{
    StorageAreas, StoredName, StoredNameView, provide_storage, use_local_storage,
    use_persisted_state, use_session_storage,
};
pub use reorder::{DragDropList, DragDropListView, move_item, sample_items};
pub use search::{Search, SearchApi, SearchConfig, SearchMode, SearchView, SimulatedApi};
pub use theme::{
    BodyClass, THEME_KEY, ThemeContext, ThemeMode, ThemeProvider, ThemeToggleButton,
    ThemeToggleButtonView, use_theme,
};

/// Records which components actually rendered. Provide one with
/// [`tether_core::provide`] to observe memoization.
#[derive(Clone, Debug, Default)]
pub struct RenderLog(Rc<RefCell<Vec<String>>>);

impl RenderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

pub(crate) fn record_render(entry: impl FnOnce() -> String) {
    if let Some(log) = tether_core::use_context::<RenderLog>() {
        log.record(entry());
    }
}
