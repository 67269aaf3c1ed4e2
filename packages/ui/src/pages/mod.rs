//! One module per page. Each page has an explicit props struct so the web
//! binary can hand it to [`crate::render_page`].

mod admin;
mod error;
mod home;
mod learning;
mod notes;

pub use admin::{AdminPage, AdminProps, Dashboard, LoginPage, LoginProps};
pub use error::{ErrorPage, ErrorProps};
pub use home::{HomePage, HomeProps};
pub use learning::{LearningPage, LearningProps};
pub use notes::{NotePage, NoteProps, NotesPage, NotesProps};
