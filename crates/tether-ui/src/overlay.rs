//! Modal overlay that closes on Escape or on a click outside its content.

use tether_core::*;

/// Focus target of the modal content.
pub const MODAL_CONTENT: &str = "modal-content";

#[derive(Clone)]
pub struct ModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub events: GlobalEvents,
}

#[derive(Clone)]
pub struct ModalView {
    on_close: Callback<()>,
    events: GlobalEvents,
}

impl ModalView {
    /// Click on the dimmed area around the content.
    pub fn click_backdrop(&self) {
        self.on_close.call(());
    }

    /// Clicks inside the content stay there.
    pub fn click_content(&self) {}

    pub fn has_focus(&self) -> bool {
        self.events.focused().as_deref() == Some(MODAL_CONTENT)
    }
}

/// Renders nothing while closed. While open, exactly one Escape listener is
/// subscribed on `events` and the content holds focus.
pub fn Modal(props: ModalProps) -> Option<ModalView> {
    let ModalProps {
        is_open,
        on_close,
        events,
    } = props;

    bind_effect(deps![is_open, on_close.clone()], {
        let (on_close, events) = (on_close.clone(), events.clone());
        move || {
            let handle_escape = Listener::new(move |event| match event {
                Event::Key(k) if k.key == Key::Escape => on_close.call(()),
                _ => {}
            });
            if is_open {
                events.add_event_listener(KEYDOWN, &handle_escape);
                events.request_focus(MODAL_CONTENT);
            }
            on_unmount(move || {
                events.remove_event_listener(KEYDOWN, &handle_escape);
            })
        }
    });

    is_open.then(|| ModalView { on_close, events })
}

#[derive(Clone)]
pub struct OverlayAppView {
    pub is_open: bool,
    pub modal: Option<ModalView>,
    on_open: Callback<()>,
    on_close: Callback<()>,
}

impl OverlayAppView {
    pub fn open(&self) {
        self.on_open.call(());
    }

    /// The close button inside the modal.
    pub fn close(&self) {
        self.on_close.call(());
    }
}

pub fn OverlayApp(events: &GlobalEvents) -> OverlayAppView {
    let is_open = use_state(|| false);

    let on_open = use_callback(deps![], {
        let is_open = is_open.clone();
        move |()| is_open.set(true)
    });
    let on_close = use_callback(deps![], {
        let is_open = is_open.clone();
        move |()| is_open.set(false)
    });

    let open = is_open.get();
    let modal = Modal(ModalProps {
        is_open: open,
        on_close: on_close.clone(),
        events: events.clone(),
    });

    OverlayAppView {
        is_open: open,
        modal,
        on_open,
        on_close,
    }
}
