//! # Store crate — portfolio content and where it lives
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Profile, links, notes and learning items, plus the [`Record`] / [`Singleton`] traits. |
//! | [`backend`] | The async [`Backend`] trait every store implements. |
//! | [`data_store`] | [`DataStore`]: health-cached, retrying primary with a fallback. |
//! | [`migrate`] | Copy of the fallback data into the document store. |
//! | [`config`] | [`ResilienceConfig`] for retries and health caching. |
//!
//! Backends: [`MemoryStore`], [`FileStore`] and, with the `mongo` feature,
//! `MongoStore`.

pub mod backend;
pub mod config;
pub mod data_store;
pub mod error;
pub mod migrate;
pub mod models;

mod file_store;
pub use file_store::FileStore;

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "mongo")]
mod mongo;
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;

pub use backend::Backend;
pub use config::ResilienceConfig;
pub use data_store::{DataStore, Source};
pub use error::StoreError;
pub use migrate::MigrationReport;
pub use models::{LearningItem, LearningResource, Link, LinkCategory, Note, Profile, Record, Singleton};
