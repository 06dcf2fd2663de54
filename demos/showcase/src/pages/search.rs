use std::rc::Rc;
use std::thread;

use tether_core::{Duration, Runtime};
use tether_ui::*;

/// Types a query with real delays so both pacing policies show up in the log.
pub fn run() {
    println!("== Throttle vs debounce");
    let rt = Runtime::new();
    let api: Rc<dyn SearchApi> = Rc::new(SimulatedApi);
    let app = || Search(api.clone(), SearchConfig::default());

    rt.render(app);
    for (pause, text) in [(0, "r"), (100, "ru"), (100, "rus"), (400, "rust"), (100, "rusty")] {
        thread::sleep(Duration::from_millis(pause));
        rt.tick();
        rt.render(app).input(text);
        rt.render(app);
    }

    thread::sleep(Duration::from_millis(600));
    rt.tick();
    let view = rt.render(app);
    println!(
        "query: {:?}, debounced: {:?}, throttled: {:?}",
        view.query, view.debounced_query, view.throttled_query
    );
    rt.unmount();
}
