//! This crate contains the server-rendered pages of the site.
//!
//! Every page is a Dioxus component rendered to a complete HTML document by
//! [`render_page`]; the web binary only has to fetch data and pick a page.

pub mod markdown;
pub mod pages;

mod layout;
pub use layout::Layout;

mod render;
pub use render::render_page;
