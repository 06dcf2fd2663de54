use std::rc::Rc;

use tether_core::*;

use crate::memo_list::Item;
use crate::record_render;

pub fn fruits() -> Vec<Item> {
    ["Apple", "Grapes", "Mango", "Cherry", "Orange", "Plum"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Item::new(id, name))
        .collect()
}

/// Case-insensitive substring match on the item name.
pub fn filter_items(items: &[Item], text: &str) -> Vec<Item> {
    let needle = text.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[derive(Clone, Debug)]
pub struct FilterListView {
    pub filter_text: String,
    pub visible: Rc<Vec<Item>>,
    on_input: Callback<String>,
}

impl FilterListView {
    pub fn input(&self, text: impl Into<String>) {
        self.on_input.call(text.into());
    }

    pub fn names(&self) -> Vec<&str> {
        self.visible.iter().map(|i| i.name.as_str()).collect()
    }
}

/// A search box over a fixed list. The list is built once; the filtered
/// view is recomputed only when the text or the list change.
pub fn FilterList() -> FilterListView {
    let filter_text = use_state(String::new);
    let text = filter_text.get();

    let items = use_memo(deps![], fruits);
    let visible = use_memo(deps![text.clone(), items.clone()], || {
        record_render(|| format!("filter {text:?}"));
        filter_items(&items, &text)
    });

    FilterListView {
        filter_text: text,
        visible,
        on_input: Callback::new(move |t: String| filter_text.set(t)),
    }
}
