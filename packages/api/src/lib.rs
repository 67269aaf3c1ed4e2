//! # API crate — the portfolio's JSON API
//!
//! Everything the web binary needs to serve `/api/*`: settings, the shared
//! [`AppState`], admin authentication and the route handlers.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Admin password check, the admin cookie and the [`auth::Admin`] extractor |
//! | [`db`] | Builds the [`db::PortfolioStore`] from settings |
//! | [`error`] | [`ApiError`] and its JSON response shape |
//! | [`routes`] | The `/api` router |
//! | [`settings`] | Layered configuration (defaults, `config.toml`, environment) |
//! | [`state`] | [`AppState`] shared by all handlers |

pub mod auth;
pub mod db;
pub mod error;
pub mod routes;
pub mod settings;
pub mod state;

pub use error::ApiError;
pub use settings::Settings;
pub use state::AppState;
