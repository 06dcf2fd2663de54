//! One search box feeding two pacing policies side by side: a debounced
//! query (trailing, after a quiet window) and a throttled query (leading,
//! at most once per interval). Each policy's non-empty output triggers a
//! simulated API call.

use std::fmt;
use std::rc::Rc;

use tether_core::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchMode {
    Debounced,
    Throttled,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMode::Debounced => "debounced",
            SearchMode::Throttled => "throttle",
        })
    }
}

pub trait SearchApi {
    fn search(&self, mode: SearchMode, query: &str);
}

/// Stands in for a backend by logging each call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedApi;

impl SearchApi for SimulatedApi {
    fn search(&self, mode: SearchMode, query: &str) {
        log::info!("Simulating API call for {mode} query: {query}");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub debounce: Duration,
    pub throttle: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            throttle: Duration::from_millis(500),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchView {
    pub query: String,
    pub debounced_query: String,
    pub throttled_query: String,
    on_input: Callback<String>,
}

impl SearchView {
    pub fn input(&self, text: impl Into<String>) {
        self.on_input.call(text.into());
    }
}

fn bind_search(api: &Rc<dyn SearchApi>, mode: SearchMode, query: &str) {
    let api = api.clone();
    let query = query.to_string();
    bind_effect(deps![query.clone()], move || {
        if !query.is_empty() {
            api.search(mode, &query);
        }
        Dispose::none()
    });
}

pub fn Search(api: Rc<dyn SearchApi>, config: SearchConfig) -> SearchView {
    let query = use_state(String::new);
    let throttled = use_state(String::new);
    let throttle = use_throttle(config.throttle);
    let runtime = use_runtime();

    let current = query.get();
    let debounced = use_debounced(current.clone(), config.debounce);
    let throttled_query = throttled.get();

    bind_search(&api, SearchMode::Debounced, &debounced);
    bind_search(&api, SearchMode::Throttled, &throttled_query);

    let on_input = Callback::new(move |text: String| {
        query.set(text.clone());
        throttle.call(runtime.now(), text, |t| throttled.set(t));
    });

    SearchView {
        query: current,
        debounced_query: debounced,
        throttled_query,
        on_input,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct Recorder {
        calls: RefCell<Vec<(SearchMode, String, Duration)>>,
        clock: ManualClock,
    }

    impl SearchApi for Recorder {
        fn search(&self, mode: SearchMode, query: &str) {
            self.calls
                .borrow_mut()
                .push((mode, query.to_string(), self.clock.elapsed()));
        }
    }

    impl Recorder {
        fn calls(&self, mode: SearchMode) -> Vec<(String, u64)> {
            self.calls
                .borrow()
                .iter()
                .filter(|(m, _, _)| *m == mode)
                .map(|(_, q, at)| (q.clone(), at.as_millis() as u64))
                .collect()
        }
    }

    struct Harness {
        clock: ManualClock,
        rt: Runtime,
        api: Rc<Recorder>,
    }

    impl Harness {
        fn new() -> Self {
            let clock = ManualClock::new();
            let api = Rc::new(Recorder {
                calls: RefCell::default(),
                clock: clock.clone(),
            });
            Self {
                rt: Runtime::with_clock(Rc::new(clock.clone())),
                clock,
                api,
            }
        }

        fn render(&self) -> SearchView {
            let api: Rc<dyn SearchApi> = self.api.clone();
            self.rt.render(|| Search(api, SearchConfig::default()))
        }

        /// Moves the clock, fires due timers, and renders.
        fn at(&self, ms: u64) -> SearchView {
            self.clock.set_elapsed(Duration::from_millis(ms));
            self.rt.tick();
            self.render()
        }

        fn type_at(&self, ms: u64, text: &str) -> SearchView {
            self.at(ms).input(text);
            self.render()
        }
    }

    #[test]
    fn test_debounce_fires_once_after_quiet_window() {
        let h = Harness::new();
        h.render();
        h.type_at(0, "a");
        h.type_at(100, "ab");
        h.type_at(200, "abc");

        let view = h.at(699);
        assert_eq!(view.debounced_query, "");
        assert!(h.api.calls(SearchMode::Debounced).is_empty());

        let view = h.at(700);
        assert_eq!(view.debounced_query, "abc");
        assert_eq!(
            h.api.calls(SearchMode::Debounced),
            vec![("abc".to_string(), 700)]
        );

        h.at(2_000);
        assert_eq!(h.api.calls(SearchMode::Debounced).len(), 1);
        assert_eq!(h.rt.pending_timers(), 0);
    }

    #[test]
    fn test_throttle_keeps_leading_events() {
        let h = Harness::new();
        h.render();
        h.type_at(0, "a");
        h.type_at(100, "ab");
        h.type_at(200, "abc");
        let view = h.type_at(600, "abcd");

        assert_eq!(view.throttled_query, "abcd");
        assert_eq!(
            h.api.calls(SearchMode::Throttled),
            vec![("a".to_string(), 0), ("abcd".to_string(), 600)]
        );
    }

    #[test]
    fn test_cleared_query_makes_no_call() {
        let h = Harness::new();
        h.render();
        h.type_at(0, "x");
        h.type_at(50, "");
        h.at(1_000);

        assert!(h.api.calls(SearchMode::Debounced).is_empty());
        assert_eq!(h.api.calls(SearchMode::Throttled), vec![("x".to_string(), 0)]);
    }

    #[test]
    fn test_unmount_cancels_pending_debounce() {
        let h = Harness::new();
        h.render();
        h.type_at(0, "abc");
        assert_eq!(h.rt.pending_timers(), 1);

        let Harness { rt, clock, api } = h;
        rt.unmount();
        clock.set_elapsed(Duration::from_millis(1_000));
        assert!(api.calls(SearchMode::Debounced).is_empty());
    }
}
