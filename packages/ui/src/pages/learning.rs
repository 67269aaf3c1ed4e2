use dioxus::prelude::*;
use store::LearningItem;

use crate::Layout;

#[derive(Props, Clone, PartialEq)]
pub struct LearningProps {
    pub items: Vec<LearningItem>,
}

#[allow(non_snake_case)]
pub fn LearningPage(props: LearningProps) -> Element {
    rsx! {
        Layout { title: "Learning",
            h1 { "Learning" }
            if props.items.is_empty() {
                p { class: "muted", "Nothing logged yet." }
            }
            for item in props.items.iter() {
                LearningCard { key: "{item.id}", item: item.clone() }
            }
        }
    }
}

#[component]
fn LearningCard(item: LearningItem) -> Element {
    let date = item.date.format("%B %Y");
    let kind = if item.r#type.is_empty() {
        String::new()
    } else {
        format!("{} · ", item.r#type)
    };

    rsx! {
        div { class: "card",
            h2 { "{item.title}" }
            p { class: "muted", "{kind}{date}" }
            if !item.description.is_empty() {
                p { "{item.description}" }
            }
            if !item.resources.is_empty() {
                ul {
                    for resource in item.resources.iter() {
                        li {
                            a { href: "{resource.url}", "{resource.title}" }
                            if !resource.description.is_empty() {
                                span { class: "muted", " {resource.description}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
