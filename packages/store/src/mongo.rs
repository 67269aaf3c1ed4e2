//! MongoDB-backed document store.
//!
//! Each [`Record`] type maps to a collection of the same name and is addressed
//! by its `id` field (the driver-assigned `_id` is ignored on read). A
//! [`Singleton`] is the only document of its collection.
//!
//! Record collections carry a unique index on `id`, created on the first
//! insert, so concurrent inserts of the same id cannot both succeed.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bson::doc;
use futures::stream::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::StoreError;
use crate::models::{Record, Singleton};

#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database_name: String,
    indexed: Arc<Mutex<HashSet<&'static str>>>,
}

/// Server code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

impl MongoStore {
    /// Build a client for `url`. The driver connects lazily, so this succeeds
    /// even while the server is down; `timeout` bounds server selection for
    /// every later operation.
    pub async fn connect(url: &str, database: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| StoreError::Backend(format!("Invalid MongoDB url: {e}")))?;
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);
        options.app_name = Some("portfolio".to_string());

        let client = Client::with_options(options)?;
        info!(database, "MongoDB client configured");

        Ok(Self {
            client,
            database_name: database.to_string(),
            indexed: Arc::default(),
        })
    }

    fn database(&self) -> Database {
        self.client.database(&self.database_name)
    }

    fn records<T: Record>(&self) -> Collection<T> {
        self.database().collection::<T>(T::COLLECTION)
    }

    fn singleton<T: Singleton>(&self) -> Collection<T> {
        self.database().collection::<T>(T::COLLECTION)
    }

    async fn ensure_id_index<T: Record>(&self, collection: &Collection<T>) -> Result<(), StoreError> {
        if self.is_indexed(T::COLLECTION) {
            return Ok(());
        }
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index).await?;
        debug!(collection = T::COLLECTION, "Unique id index ensured");

        self.indexed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(T::COLLECTION);
        Ok(())
    }

    fn is_indexed(&self, collection: &str) -> bool {
        self.indexed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(collection)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

impl Backend for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn list<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let cursor = self.records::<T>().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get<T: Record>(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.records::<T>().find_one(doc! { "id": id }).await?)
    }

    async fn insert<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        let collection = self.records::<T>();
        self.ensure_id_index(&collection).await?;
        match collection.insert_one(record).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::Conflict {
                collection: T::COLLECTION,
                id: record.id().to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn replace<T: Record>(&self, record: &T) -> Result<bool, StoreError> {
        let result = self
            .records::<T>()
            .replace_one(doc! { "id": record.id() }, record)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn remove<T: Record>(&self, id: &str) -> Result<bool, StoreError> {
        let result = self.records::<T>().delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn load<T: Singleton>(&self) -> Result<Option<T>, StoreError> {
        Ok(self.singleton::<T>().find_one(doc! {}).await?)
    }

    async fn save<T: Singleton>(&self, value: &T) -> Result<(), StoreError> {
        self.singleton::<T>()
            .replace_one(doc! {}, value)
            .upsert(true)
            .await?;
        Ok(())
    }
}
