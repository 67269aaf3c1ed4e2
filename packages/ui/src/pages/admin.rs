use dioxus::prelude::*;
use store::{MigrationReport, Source};

use crate::Layout;

#[derive(Props, Clone, PartialEq)]
pub struct LoginProps {
    pub error: Option<String>,
}

#[allow(non_snake_case)]
pub fn LoginPage(props: LoginProps) -> Element {
    let error = props.error.map(|message| {
        rsx! {
            p { class: "error", "{message}" }
        }
    });

    rsx! {
        Layout { title: "Admin login",
            h1 { "Admin login" }
            {error}
            form { method: "post", action: "/admin/login",
                input {
                    r#type: "password",
                    name: "password",
                    placeholder: "Password",
                    autofocus: true,
                    required: true,
                }
                " "
                button { r#type: "submit", "Log in" }
            }
        }
    }
}

/// What the dashboard shows about the data layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub backend: Source,
    pub has_profile: bool,
    pub links: usize,
    pub notes: usize,
    pub learning: usize,
}

#[derive(Props, Clone, PartialEq)]
pub struct AdminProps {
    pub dashboard: Dashboard,
    /// Result of the last migration run from this page.
    pub migration: Option<MigrationReport>,
}

#[allow(non_snake_case)]
pub fn AdminPage(props: AdminProps) -> Element {
    let AdminProps {
        dashboard,
        migration,
    } = props;
    let backend = match dashboard.backend {
        Source::Primary => "document store",
        Source::Fallback => "JSON files (fallback)",
    };
    let profile = if dashboard.has_profile { "set" } else { "missing" };
    let migration = migration.map(|report| {
        rsx! {
            p { class: "notice",
                "Migrated {report.links} links, {report.notes} notes and {report.learning} learning items."
            }
        }
    });

    rsx! {
        Layout { title: "Admin",
            h1 { "Admin" }
            {migration}
            div { class: "card",
                h2 { "Backend" }
                p { "Serving from {backend}." }
            }
            div { class: "card",
                h2 { "Content" }
                ul {
                    li { "Profile: {profile}" }
                    li { "Links: {dashboard.links}" }
                    li { "Notes: {dashboard.notes}" }
                    li { "Learning items: {dashboard.learning}" }
                }
            }
            form { class: "inline", method: "post", action: "/admin/migrate",
                button { r#type: "submit", "Copy files to document store" }
            }
            " "
            form { class: "inline", method: "post", action: "/admin/logout",
                button { r#type: "submit", "Log out" }
            }
        }
    }
}
