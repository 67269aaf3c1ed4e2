use dioxus::prelude::*;

/// Render `page` with `props` to a full HTML document.
pub fn render_page<P: Clone + 'static>(page: fn(P) -> Element, props: P) -> String {
    let mut dom = VirtualDom::new_with_props(page, props);
    dom.rebuild_in_place();
    format!(
        "<!DOCTYPE html><html lang=\"en\">{}</html>",
        dioxus_ssr::render(&dom)
    )
}
