//! # Database module — building the data-access layer
//!
//! [`connect`] turns the `[mongo]`, `[storage]` and `[resilience]` settings
//! into a [`PortfolioStore`]: a [`store::DataStore`] with MongoDB as primary
//! and the JSON files under `storage.data_dir` as fallback.
//!
//! An empty `mongo.url` (or a url the driver rejects) leaves the primary out,
//! so the site keeps running on the files alone.

mod pool;

pub use pool::{connect, PortfolioStore};
