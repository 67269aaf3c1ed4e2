use dioxus::prelude::*;

use crate::Layout;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorProps {
    pub heading: String,
    pub message: String,
}

/// Shown for unknown paths and for requests the store could not serve.
#[allow(non_snake_case)]
pub fn ErrorPage(props: ErrorProps) -> Element {
    rsx! {
        Layout { title: "{props.heading}",
            h1 { "{props.heading}" }
            p { class: "muted", "{props.message}" }
            p {
                a { href: "/", "Back home" }
            }
        }
    }
}
