use std::sync::Arc;

use crate::db::PortfolioStore;
use crate::settings::{Auth, Settings};

/// Shared by every handler; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PortfolioStore>,
    pub auth: Arc<Auth>,
}

impl AppState {
    pub fn new(store: PortfolioStore, settings: &Settings) -> Self {
        Self {
            store: Arc::new(store),
            auth: Arc::new(settings.auth.clone()),
        }
    }
}
