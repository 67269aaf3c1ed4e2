use dioxus::prelude::*;
use store::Note;

use crate::markdown::{excerpt, render_markdown};
use crate::Layout;

const EXCERPT_CHARS: usize = 160;

#[derive(Props, Clone, PartialEq)]
pub struct NotesProps {
    pub notes: Vec<Note>,
}

#[allow(non_snake_case)]
pub fn NotesPage(props: NotesProps) -> Element {
    rsx! {
        Layout { title: "Notes",
            h1 { "Notes" }
            if props.notes.is_empty() {
                p { class: "muted", "No notes yet." }
            }
            for note in props.notes.iter() {
                NoteCard { key: "{note.id}", note: note.clone() }
            }
        }
    }
}

#[component]
fn NoteCard(note: Note) -> Element {
    let date = note.date.format("%B %-d, %Y");
    let summary = excerpt(&note.content, EXCERPT_CHARS);

    rsx! {
        div { class: "card",
            h2 {
                a { href: "/notes/{note.id}", "{note.title}" }
            }
            p { class: "muted", "{date}" }
            p { "{summary}" }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct NoteProps {
    pub note: Note,
}

/// A single note with its markdown body rendered.
#[allow(non_snake_case)]
pub fn NotePage(props: NoteProps) -> Element {
    let note = props.note;
    let date = note.date.format("%B %-d, %Y");
    let body = render_markdown(&note.content);

    rsx! {
        Layout { title: "{note.title}",
            p {
                a { href: "/notes", "← All notes" }
            }
            h1 { "{note.title}" }
            p { class: "muted", "{date}" }
            div { class: "markdown", dangerous_inner_html: "{body}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::render_page;

    fn note(id: &str, title: &str, content: &str) -> Note {
        Note {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            date: "2024-03-01".parse().unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_notes_list() {
        let html = render_page(
            NotesPage,
            NotesProps {
                notes: vec![note("1", "First", "Hello **there**"), note("2", "Second", "")],
            },
        );
        assert!(html.contains("First"));
        assert!(html.contains("Hello there"));
        assert!(html.contains("March 1, 2024"));
        assert!(!html.contains("No notes yet."));
    }

    #[test]
    fn test_empty_notes_list() {
        let html = render_page(NotesPage, NotesProps { notes: vec![] });
        assert!(html.contains("No notes yet."));
    }

    #[test]
    fn test_note_page_renders_markdown_and_escapes_title() {
        let html = render_page(
            NotePage,
            NoteProps {
                note: note("1", "<script>", "## Section\n\n`code`"),
            },
        );
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<h1><script>"));
        assert!(html.contains("<h2>Section</h2>"));
        assert!(html.contains("<code>code</code>"));
    }
}
