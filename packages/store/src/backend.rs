//! # Backend — the storage seam shared by every store
//!
//! [`Backend`] is the async interface the data-access layer talks to. It is
//! implemented by [`crate::MongoStore`] (the document store), by
//! [`crate::FileStore`] (the JSON fallback) and by [`crate::MemoryStore`]
//! (tests and local development).
//!
//! Record operations are generic over [`Record`]; the profile goes through
//! [`load`](Backend::load) / [`save`](Backend::save) since it is a
//! [`Singleton`]. Backends do no validation and no id generation: that is the
//! job of [`crate::DataStore`].

use std::future::Future;

use crate::error::StoreError;
use crate::models::{Record, Singleton};

pub trait Backend: Send + Sync {
    /// Cheap round trip proving the backend answers.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn list<T: Record>(&self) -> impl Future<Output = Result<Vec<T>, StoreError>> + Send;

    fn get<T: Record>(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<T>, StoreError>> + Send;

    /// Append a record. Fails with [`StoreError::Conflict`] on a duplicate id.
    fn insert<T: Record>(&self, record: &T) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace the record with the same id. Returns `false` when none exists.
    fn replace<T: Record>(
        &self,
        record: &T,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Delete by id. Returns `false` when nothing was removed.
    fn remove<T: Record>(&self, id: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;

    fn load<T: Singleton>(&self) -> impl Future<Output = Result<Option<T>, StoreError>> + Send;

    fn save<T: Singleton>(&self, value: &T) -> impl Future<Output = Result<(), StoreError>> + Send;
}
