use tether_core::Runtime;
use tether_ui::*;

use crate::Host;

pub fn run(host: &Host) {
    println!("== Contact form");
    let rt = Runtime::new();
    let view = rt.render(ContactForm);
    view.change(Field::Name, "Al");
    view.change(Field::Email, "al@example");
    view.change(Field::Message, "hi");
    let view = rt.render(ContactForm);
    view.submit();
    let view = rt.render(ContactForm);
    println!("status: {:?}", view.status);
    for field in Field::ALL {
        if let Some(msg) = view.errors.get(field) {
            println!("  {}: {msg}", field.label());
        }
    }

    view.change(Field::Name, "Alice");
    view.change(Field::Email, "alice@example.com");
    view.change(Field::Message, "Hello there, this is long enough.");
    let view = rt.render(ContactForm);
    view.submit();
    let view = rt.render(ContactForm);
    println!("status: {:?}", view.status);
    if let Some(msg) = view.success_message() {
        println!("  {msg}");
    }
    rt.unmount();

    println!("== Local storage");
    let rt = Runtime::new();
    let app = || provide_storage(host.areas.clone(), StoredName);
    let view = rt.render(app);
    println!("stored name: {}", view.name);
    view.input(format!("{}!", view.name));
    let view = rt.render(app);
    println!("stored name: {} (saved to {})", view.name, host.local.path().display());
    rt.unmount();
}
