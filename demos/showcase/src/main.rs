//! Scripted walk through every demo component, printing what each view shows.
//!
//! `RUST_LOG` sets the log level (default `info`); `TETHER_STORE` points local
//! storage at a JSON file (default `tether-storage.json` in the temp dir).

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use tether_core::*;
use tether_ui::StorageAreas;

mod pages {
    pub mod forms;
    pub mod lists;
    pub mod overlay;
    pub mod search;
}

pub struct Host {
    pub local: Rc<FileStore>,
    pub areas: StorageAreas,
    pub events: GlobalEvents,
}

fn store_path() -> PathBuf {
    std::env::var_os("TETHER_STORE")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("tether-storage.json"))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = store_path();
    let local = Rc::new(
        FileStore::open(&path).with_context(|| format!("opening {}", path.display()))?,
    );
    log::info!("local storage at {}", local.path().display());

    let host = Host {
        areas: StorageAreas::new(local.clone(), Rc::new(MemoryStore::new())),
        local,
        events: GlobalEvents::new(),
    };

    pages::forms::run(&host);
    pages::lists::run();
    pages::overlay::run(&host);
    pages::search::run();
    Ok(())
}
