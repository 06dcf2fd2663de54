use std::fmt;
use std::rc::Rc;

use tether_core::*;

/// Moves the element at `from` to `to`, keeping everything else in order.
///
/// The result is one new sequence; `from == to` returns `items` itself.
///
/// # Panics
///
/// If either index is out of bounds.
pub fn move_item<T: Clone>(items: &Rc<Vec<T>>, from: usize, to: usize) -> Rc<Vec<T>> {
    let len = items.len();
    assert!(
        from < len && to < len,
        "move_item({from}, {to}) out of bounds for {len} items"
    );
    if from == to {
        return items.clone();
    }
    let mut next = Vec::clone(items);
    let item = next.remove(from);
    next.insert(to, item);
    Rc::new(next)
}

pub fn sample_items() -> Vec<String> {
    (1..=4).map(|n| format!("Item {n}")).collect()
}

pub struct DragDropListView<T: 'static> {
    pub items: Rc<Vec<T>>,
    pub dragged: Option<usize>,
    on_drag_start: Callback<usize>,
    on_drag_over: Callback<usize>,
    on_drop: Callback<()>,
}

impl<T: 'static> Clone for DragDropListView<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            dragged: self.dragged,
            on_drag_start: self.on_drag_start.clone(),
            on_drag_over: self.on_drag_over.clone(),
            on_drop: self.on_drop.clone(),
        }
    }
}

impl<T: 'static> DragDropListView<T> {
    pub fn is_dragging(&self, index: usize) -> bool {
        self.dragged == Some(index)
    }

    pub fn drag_start(&self, index: usize) {
        self.on_drag_start.call(index);
    }

    /// The dragged row passes over `index`: it moves there and stays the
    /// dragged row.
    pub fn drag_over(&self, index: usize) {
        self.on_drag_over.call(index);
    }

    pub fn drop(&self) {
        self.on_drop.call(());
    }
}

/// One row per line, `*` marking the dragged row.
impl<T: fmt::Display + 'static> fmt::Display for DragDropListView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            let mark = if self.is_dragging(i) { '*' } else { '-' };
            writeln!(f, "{mark} {item}")?;
        }
        Ok(())
    }
}

pub fn DragDropList<T>(initial: impl FnOnce() -> Vec<T>) -> DragDropListView<T>
where
    T: Clone + 'static,
{
    let items = use_state(|| Rc::new(initial()));
    let dragged = use_state(|| None::<usize>);

    let current = items.get();
    let dragging = dragged.get();

    let on_drag_start = Callback::new({
        let dragged = dragged.clone();
        let len = current.len();
        move |index: usize| {
            if index >= len {
                log::warn!("ignoring drag start at {index}: only {len} items");
                return;
            }
            dragged.set(Some(index));
        }
    });

    let on_drag_over = Callback::new({
        let (items, dragged) = (items.clone(), dragged.clone());
        let current = current.clone();
        move |index: usize| {
            log::trace!("drag over {index}, dragging {dragging:?}");
            let Some(from) = dragging else {
                return;
            };
            if from == index {
                return;
            }
            if from >= current.len() || index >= current.len() {
                log::warn!(
                    "ignoring drag from {from} over {index}: only {} items",
                    current.len()
                );
                return;
            }
            items.set(move_item(&current, from, index));
            dragged.set(Some(index));
        }
    });

    let on_drop = Callback::new(move |()| dragged.set(None));

    DragDropListView {
        items: current,
        dragged: dragging,
        on_drag_start,
        on_drag_over,
        on_drop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Rc<Vec<char>> {
        Rc::new(vec!['A', 'B', 'C', 'D'])
    }

    #[test]
    fn test_move_forward_and_back() {
        let items = letters();
        assert_eq!(*move_item(&items, 0, 2), vec!['B', 'C', 'A', 'D']);
        assert_eq!(*move_item(&items, 3, 0), vec!['D', 'A', 'B', 'C']);
        assert_eq!(*items, vec!['A', 'B', 'C', 'D']);
    }

    #[test]
    fn test_move_to_same_index_is_identity() {
        let items = letters();
        for i in 0..items.len() {
            assert!(Rc::ptr_eq(&move_item(&items, i, i), &items));
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_move_out_of_bounds_panics() {
        move_item(&letters(), 1, 4);
    }

    #[test]
    fn test_drag_flow() {
        let rt = Runtime::new();
        let app = || DragDropList(sample_items);

        let view = rt.render(app);
        view.drag_start(0);
        let view = rt.render(app);
        view.drag_over(1);
        let view = rt.render(app);
        view.drag_over(2);
        let view = rt.render(app);

        insta::assert_snapshot!(view.to_string().trim_end(), @r"
        - Item 2
        - Item 3
        * Item 1
        - Item 4
        ");

        view.drop();
        let view = rt.render(app);
        assert_eq!(view.dragged, None);
        assert_eq!(view.items[2], "Item 1");
    }

    #[test]
    fn test_drag_over_same_row_does_not_write() {
        let rt = Runtime::new();
        let app = || DragDropList(sample_items);
        let view = rt.render(app);
        view.drag_start(1);
        let view = rt.render(app);
        let before = view.items.clone();

        view.drag_over(1);
        assert!(!rt.needs_render());
        let view = rt.render(app);
        assert!(Rc::ptr_eq(&before, &view.items));
    }

    #[test]
    fn test_user_driven_indices_out_of_range_are_ignored() {
        let rt = Runtime::new();
        let app = || DragDropList(sample_items);

        let view = rt.render(app);
        view.drag_over(1);
        view.drag_start(9);
        assert!(!rt.needs_render());

        view.drag_start(0);
        let view = rt.render(app);
        view.drag_over(9);
        let view = rt.render(app);
        assert_eq!(*view.items, sample_items());
        assert!(view.is_dragging(0));
    }
}
