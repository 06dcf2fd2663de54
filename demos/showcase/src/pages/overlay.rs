use tether_core::{KEYDOWN, Key, Runtime};
use tether_ui::*;

use crate::Host;

pub fn run(host: &Host) {
    println!("== Modal");
    let rt = Runtime::new();
    let app = || OverlayApp(&host.events);
    rt.render(app).open();
    let view = rt.render(app);
    println!(
        "open: {}, listeners: {}, focused: {:?}",
        view.is_open,
        host.events.listener_count(KEYDOWN),
        host.events.focused()
    );
    host.events.key_down(Key::Escape);
    let view = rt.render(app);
    println!(
        "open: {}, listeners: {}",
        view.is_open,
        host.events.listener_count(KEYDOWN)
    );
    rt.unmount();

    println!("== Theme");
    let rt = Runtime::new();
    let body = BodyClass::new();
    let app = || ThemeProvider(host.local.clone(), &body, ThemeToggleButton);
    for _ in 0..2 {
        let button = rt.render(app);
        println!("body: {:?}, button: {:?}", body.get(), button.label);
        button.click();
    }
    rt.render(app);
    println!("body: {:?}", body.get());
    rt.unmount();
}
