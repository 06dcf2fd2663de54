//! A list whose rows are memoized children sharing one stable click handler,
//! so re-rendering the parent re-renders no row whose item is unchanged.

use std::rc::Rc;

use tether_core::*;

use crate::record_render;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: u32,
    pub name: String,
}

impl Item {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

pub fn sample_people() -> Vec<Item> {
    ["Shoyo", "Melody", "Hinata", "Kageyama", "Tenaka"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Item::new(id, name))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListItemProps {
    pub item: Item,
    pub on_click: Callback<String>,
}

#[derive(Clone, Debug)]
pub struct ListItemView {
    pub name: String,
    on_click: Callback<String>,
}

impl ListItemView {
    pub fn click(&self) {
        self.on_click.call(self.name.clone());
    }

    pub fn handler(&self) -> &Callback<String> {
        &self.on_click
    }
}

pub fn ListItem(props: &ListItemProps) -> ListItemView {
    record_render(|| format!("ListItem {}", props.item.name));
    ListItemView {
        name: props.item.name.clone(),
        on_click: props.on_click.clone(),
    }
}

pub fn List(items: &Rc<Vec<Item>>) -> Vec<ListItemView> {
    record_render(|| "List".to_string());

    let handle_click = use_callback(deps![], |name: String| {
        log::info!("click event fired on {name}");
    });

    items
        .iter()
        .map(|item| {
            let props = ListItemProps {
                item: item.clone(),
                on_click: handle_click.clone(),
            };
            memo_child(format!("list-item:{}", item.id), props, ListItem)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderLog;

    struct Harness {
        rt: Runtime,
        renders: RenderLog,
        items: StateCell<Rc<Vec<Item>>>,
        ticks: StateCell<u32>,
    }

    impl Harness {
        fn new() -> Self {
            let rt = Runtime::new();
            Self {
                items: rt.cell(Rc::new(sample_people())),
                ticks: rt.cell(0),
                renders: RenderLog::new(),
                rt,
            }
        }

        fn render(&self) -> Vec<ListItemView> {
            self.rt.render(|| {
                let _ = self.ticks.get();
                provide(self.renders.clone(), || List(&self.items.get()))
            })
        }
    }

    #[test]
    fn test_parent_rerender_skips_unchanged_rows() {
        let h = Harness::new();
        let first = h.render();
        assert_eq!(first.len(), 5);
        assert_eq!(h.renders.take().len(), 6);

        h.ticks.update(|t| t + 1);
        let second = h.render();
        assert_eq!(h.renders.take(), vec!["List"]);
        assert_eq!(second[2].name, "Hinata");
    }

    #[test]
    fn test_changed_item_rerenders_only_its_row() {
        let h = Harness::new();
        h.render();
        h.renders.take();

        h.items.update(|items| {
            let mut next = Vec::clone(items);
            next[1].name = "Melody Ann".into();
            Rc::new(next)
        });
        let rows = h.render();
        assert_eq!(h.renders.take(), vec!["List", "ListItem Melody Ann"]);
        assert_eq!(rows[1].name, "Melody Ann");
    }

    #[test]
    fn test_click_handler_identity_is_stable() {
        let h = Harness::new();
        let first = h.render();
        h.ticks.set(1);
        let second = h.render();

        assert_eq!(first[0].handler(), second[4].handler());
        second[3].click();
        assert!(!h.rt.needs_render());
    }
}
