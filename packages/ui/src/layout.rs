use dioxus::prelude::*;

const SITE_CSS: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #37352f; background: #fff; }
header { display: flex; gap: 1.25rem; align-items: center; padding: 1rem 2rem; border-bottom: 1px solid #e9e9e7; }
header .brand { font-weight: 700; margin-right: auto; color: inherit; text-decoration: none; }
header a { color: #787774; text-decoration: none; }
header a:hover { color: #37352f; }
main { max-width: 48rem; margin: 0 auto; padding: 2rem; }
h1 { font-size: 1.75rem; margin: 0 0 0.5rem; }
.muted { color: #787774; font-size: 0.875rem; }
.card { border: 1px solid #e9e9e7; border-radius: 6px; padding: 1rem 1.25rem; margin-bottom: 1rem; }
.card h2 { font-size: 1.125rem; margin: 0 0 0.25rem; }
.tags { display: flex; flex-wrap: wrap; gap: 0.5rem; padding: 0; list-style: none; }
.tags li { background: #f1f1ef; border-radius: 4px; padding: 0.125rem 0.5rem; font-size: 0.875rem; }
.error { color: #e03e3e; }
.notice { color: #0f7b6c; }
form.inline { display: inline; }
input[type=password] { padding: 0.5rem; border: 1px solid #e9e9e7; border-radius: 4px; }
button { padding: 0.5rem 1rem; border: 1px solid #e9e9e7; border-radius: 4px; background: #f7f6f3; cursor: pointer; }
.markdown pre { background: #f7f6f3; padding: 1rem; overflow-x: auto; }
.markdown table { border-collapse: collapse; }
.markdown td, .markdown th { border: 1px solid #e9e9e7; padding: 0.25rem 0.5rem; }
"#;

/// Page shell: document head, navigation and the main column. The
/// surrounding `<html>` element is added by [`crate::render_page`].
#[component]
pub fn Layout(title: String, children: Element) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{title}" }
            style { dangerous_inner_html: SITE_CSS }
        }
        body {
            header {
                a { class: "brand", href: "/", "Portfolio" }
                a { href: "/notes", "Notes" }
                a { href: "/learning", "Learning" }
                a { href: "/admin", "Admin" }
            }
            main { {children} }
        }
    }
}
