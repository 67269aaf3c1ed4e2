//! Data store construction from settings.

use std::time::Duration;

use store::{DataStore, FileStore, MongoStore};
use tracing::{info, warn};

use crate::settings::Settings;

pub type PortfolioStore = DataStore<MongoStore, FileStore>;

pub async fn connect(settings: &Settings) -> PortfolioStore {
    let fallback = FileStore::new(&settings.storage.data_dir);
    info!(data_dir = %settings.storage.data_dir, "Fallback store ready");

    let url = settings.mongo.url.trim();
    let primary = if url.is_empty() {
        warn!("mongo.url not set, serving from the fallback store only");
        None
    } else {
        let timeout = Duration::from_millis(settings.mongo.timeout_ms);
        match MongoStore::connect(url, &settings.mongo.database, timeout).await {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("Document store disabled: {}", e);
                None
            }
        }
    };

    DataStore::new(primary, fallback, settings.resilience.clone())
}
