use std::rc::Rc;

use tether_core::{Runtime, provide};
use tether_ui::*;

pub fn run() {
    println!("== Drag and drop");
    let rt = Runtime::new();
    let app = || DragDropList(sample_items);
    let view = rt.render(app);
    view.drag_start(0);
    for over in [1, 2, 3] {
        rt.render(app).drag_over(over);
    }
    let view = rt.render(app);
    print!("{view}");
    view.drop();
    print!("{}", rt.render(app));
    rt.unmount();

    println!("== Memoized filter");
    let rt = Runtime::new();
    let renders = RenderLog::new();
    let app = || provide(renders.clone(), FilterList);
    for text in ["", "an", "an", "P"] {
        rt.render(app).input(text);
        let view = rt.render(app);
        println!("{:?} -> {:?}", view.filter_text, view.names());
    }
    println!("recomputed: {:?}", renders.take());
    rt.unmount();

    println!("== Memoized rows");
    let rt = Runtime::new();
    let items = Rc::new(sample_people());
    let tick = rt.cell(0u32);
    let app = || {
        let _ = tick.get();
        provide(renders.clone(), || List(&items))
    };
    let rows = rt.render(app);
    tick.set(1);
    rt.render(app);
    rows[0].click();
    println!("rendered: {:?}", renders.take());
    rt.unmount();
}
