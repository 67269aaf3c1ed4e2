use dioxus::prelude::*;
use store::{Link, LinkCategory, Profile};

use crate::Layout;

#[derive(Props, Clone, PartialEq)]
pub struct HomeProps {
    pub profile: Option<Profile>,
    pub links: Vec<Link>,
}

/// Landing page: the profile, when there is one, and the two link lists.
#[allow(non_snake_case)]
pub fn HomePage(props: HomeProps) -> Element {
    let HomeProps { profile, links } = props;

    let title = profile
        .as_ref()
        .map_or_else(|| "Portfolio".to_string(), |p| p.name.clone());
    let empty = profile.is_none() && links.is_empty();
    let (work, presence): (Vec<Link>, Vec<Link>) = links
        .into_iter()
        .partition(|link| link.category == LinkCategory::Work);

    let header = match profile {
        Some(profile) => rsx! {
            ProfileHeader { profile: profile }
        },
        None => rsx! {
            h1 { "Portfolio" }
        },
    };

    rsx! {
        Layout { title: "{title}",
            {header}
            if empty {
                p { class: "muted", "Nothing here yet." }
            }
            LinkSection { heading: "Work", links: work }
            LinkSection { heading: "Elsewhere", links: presence }
        }
    }
}

#[component]
fn ProfileHeader(profile: Profile) -> Element {
    let image = profile.image_url.as_ref().map(|src| {
        rsx! {
            img { class: "avatar", src: "{src}", alt: "{profile.name}", width: "96" }
        }
    });
    let email = (!profile.email.is_empty()).then(|| {
        rsx! {
            a { href: "mailto:{profile.email}", "{profile.email}" }
        }
    });

    rsx! {
        {image}
        h1 { "{profile.name}" }
        p { "{profile.title}" }
        p { class: "muted",
            "{profile.location} "
            {email}
        }
        if !profile.skills.is_empty() {
            h2 { "Skills" }
            ul { class: "tags",
                for skill in profile.skills.iter() {
                    li { "{skill}" }
                }
            }
        }
        if !profile.interests.is_empty() {
            h2 { "Interests" }
            ul { class: "tags",
                for interest in profile.interests.iter() {
                    li { "{interest}" }
                }
            }
        }
    }
}

#[component]
fn LinkSection(heading: String, links: Vec<Link>) -> Element {
    if links.is_empty() {
        return rsx! {};
    }

    rsx! {
        h2 { "{heading}" }
        ul {
            for link in links.iter() {
                li { key: "{link.id}",
                    a { href: "{link.url}", "data-icon": "{link.icon}", "{link.name}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_page;

    fn link(id: &str, category: LinkCategory) -> Link {
        Link {
            id: id.into(),
            name: format!("{id} link"),
            url: format!("https://{id}.example"),
            icon: String::new(),
            category,
        }
    }

    #[test]
    fn test_home_page() {
        let profile = Profile {
            name: "Ada Lovelace".into(),
            title: "Analyst & Engineer".into(),
            location: "London".into(),
            email: "ada@example.com".into(),
            skills: vec!["Rust".into()],
            interests: vec![],
            image_url: None,
        };
        let html = render_page(
            HomePage,
            HomeProps {
                profile: Some(profile),
                links: vec![link("cv", LinkCategory::Work), link("gh", LinkCategory::Presence)],
            },
        );

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Ada Lovelace</title>"));
        assert!(html.contains("Analyst &amp; Engineer"));
        assert!(html.contains("mailto:ada@example.com"));
        assert!(html.contains("Skills"));
        assert!(!html.contains("Interests"));
        assert!(html.contains("cv.example"));
        assert!(html.contains("Elsewhere"));
    }

    #[test]
    fn test_home_page_without_profile() {
        let html = render_page(
            HomePage,
            HomeProps {
                profile: None,
                links: vec![],
            },
        );
        assert!(html.contains("Nothing here yet."));
    }

    #[test]
    fn test_home_page_lists_links_without_profile() {
        let html = render_page(
            HomePage,
            HomeProps {
                profile: None,
                links: vec![link("gh", LinkCategory::Presence), link("cv", LinkCategory::Work)],
            },
        );
        assert!(html.contains("<title>Portfolio</title>"));
        assert!(html.contains("gh link"));
        assert!(html.contains("cv link"));
        assert!(html.contains("Elsewhere"));
        assert!(!html.contains("Nothing here yet."));
    }
}
