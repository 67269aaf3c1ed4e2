//! # DataStore — dual-backend data access
//!
//! [`DataStore`] is what request handlers talk to. It owns an optional
//! primary [`Backend`] (the document store) and a fallback backend (the JSON
//! files) and routes every operation:
//!
//! 1. If no primary is configured, the fallback serves everything.
//! 2. Otherwise the primary's reachability is checked with a bounded `ping`.
//!    The answer is cached for `health_ttl`, so a burst of requests costs one
//!    round trip.
//! 3. A reachable primary gets the operation, retried on transient errors with
//!    exponential backoff (`base_delay * 2^n`).
//! 4. If the primary is unreachable, or still failing transiently after the
//!    last attempt, it is marked down and the fallback serves the operation.
//!
//! Non-transient errors (not found, conflicts, validation, corrupt data) are
//! returned as they are and never trigger the fallback.
//!
//! The two stores are never reconciled: a write served by the fallback stays
//! there until [`migrate`](DataStore::migrate) copies it over, and the last
//! writer wins.
//!
//! ## Record semantics
//!
//! | Method | Behaviour |
//! |--------|-----------|
//! | [`list`](DataStore::list) | All records, ordered by [`Record::sort`]. |
//! | [`get`](DataStore::get) | [`StoreError::NotFound`] when missing. |
//! | [`create`](DataStore::create) | Assigns a timestamp id when none is given, validates, stamps, inserts. |
//! | [`update`](DataStore::update) | Full replacement keyed by the path id; keeps audit fields of the stored version. |
//! | [`delete`](DataStore::delete) | [`StoreError::NotFound`] when missing. |
//! | [`load_singleton`](DataStore::load_singleton) / [`save_singleton`](DataStore::save_singleton) | Profile read and whole-record upsert. |

use std::future::Future;
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Instant};
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::config::ResilienceConfig;
use crate::error::StoreError;
use crate::file_store::FileStore;
use crate::migrate::{copy_all, MigrationReport};
use crate::models::{timestamp_id, Record, Singleton};

/// Which backend is currently serving requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Primary,
    Fallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Primary => "primary",
            Source::Fallback => "fallback",
        }
    }
}

/// Last reachability verdict for the primary and when it was taken.
#[derive(Debug, Default)]
struct HealthCache {
    state: Mutex<Option<(Instant, bool)>>,
}

impl HealthCache {
    fn fresh(&self, ttl: std::time::Duration) -> Option<bool> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        (*state)
            .filter(|(checked, _)| checked.elapsed() < ttl)
            .map(|(_, up)| up)
    }

    /// Store a verdict, returning the previous one.
    fn record(&self, up: bool) -> Option<bool> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.replace((Instant::now(), up)).map(|(_, was)| was)
    }
}

pub struct DataStore<P, F = FileStore> {
    primary: Option<P>,
    fallback: F,
    config: ResilienceConfig,
    health: HealthCache,
}

impl<P: Backend, F: Backend> DataStore<P, F> {
    pub fn new(primary: Option<P>, fallback: F, config: ResilienceConfig) -> Self {
        Self {
            primary,
            fallback,
            config,
            health: HealthCache::default(),
        }
    }

    pub fn fallback_only(fallback: F, config: ResilienceConfig) -> Self {
        Self::new(None, fallback, config)
    }

    pub fn primary(&self) -> Option<&P> {
        self.primary.as_ref()
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// The backend the next operation would be routed to.
    pub async fn status(&self) -> Source {
        match &self.primary {
            Some(primary) if self.is_reachable(primary).await => Source::Primary,
            _ => Source::Fallback,
        }
    }

    pub async fn list<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let mut records = self
            .dispatch("list", |p| p.list::<T>(), |f| f.list::<T>())
            .await?;
        T::sort(&mut records);
        Ok(records)
    }

    pub async fn get<T: Record>(&self, id: &str) -> Result<T, StoreError> {
        self.dispatch("get", move |p| p.get::<T>(id), move |f| f.get::<T>(id))
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }

    pub async fn create<T: Record>(&self, mut record: T) -> Result<T, StoreError> {
        let now = Utc::now();
        if record.id().trim().is_empty() {
            record.set_id(self.unused_id::<T>(now).await?);
        }
        record.validate()?;
        record.touch(None, now);

        self.dispatch(
            "insert",
            |p| p.insert(&record),
            |f| f.insert(&record),
        )
        .await?;
        debug!(collection = T::COLLECTION, id = record.id(), "Record created");
        Ok(record)
    }

    pub async fn update<T: Record>(&self, id: &str, mut record: T) -> Result<T, StoreError> {
        record.set_id(id.to_string());
        record.validate()?;
        let previous = self.get::<T>(id).await?;
        record.touch(Some(&previous), Utc::now());

        let replaced = self
            .dispatch(
                "replace",
                |p| p.replace(&record),
                |f| f.replace(&record),
            )
            .await?;
        if !replaced {
            return Err(not_found::<T>(id));
        }
        Ok(record)
    }

    pub async fn delete<T: Record>(&self, id: &str) -> Result<(), StoreError> {
        let removed = self
            .dispatch(
                "remove",
                move |p| p.remove::<T>(id),
                move |f| f.remove::<T>(id),
            )
            .await?;
        if removed {
            Ok(())
        } else {
            Err(not_found::<T>(id))
        }
    }

    pub async fn load_singleton<T: Singleton>(&self) -> Result<T, StoreError> {
        self.dispatch("load", |p| p.load::<T>(), |f| f.load::<T>())
            .await?
            .ok_or_else(|| StoreError::NotFound {
                collection: T::COLLECTION,
                id: T::COLLECTION.to_string(),
            })
    }

    pub async fn save_singleton<T: Singleton>(&self, value: T) -> Result<T, StoreError> {
        value.validate()?;
        self.dispatch("save", |p| p.save(&value), |f| f.save(&value))
            .await?;
        Ok(value)
    }

    /// Copy everything in the fallback into the primary.
    pub async fn migrate(&self) -> Result<MigrationReport, StoreError> {
        let Some(primary) = &self.primary else {
            return Err(StoreError::Unreachable(
                "document store is not configured".into(),
            ));
        };
        match timeout(self.config.ping_timeout(), primary.ping()).await {
            Ok(Ok(())) => {
                self.health.record(true);
            }
            Ok(Err(e)) => {
                self.health.record(false);
                return Err(StoreError::Unreachable(e.to_string()));
            }
            Err(_) => {
                self.health.record(false);
                return Err(StoreError::Unreachable("document store ping timed out".into()));
            }
        }

        let report = copy_all(&self.fallback, primary).await?;
        info!(?report, "Migrated fallback data into the document store");
        Ok(report)
    }

    async fn unused_id<T: Record>(&self, now: chrono::DateTime<Utc>) -> Result<String, StoreError> {
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = timestamp_id(
                chrono::DateTime::from_timestamp_millis(millis).unwrap_or(now),
            );
            let id = candidate.as_str();
            let taken = self
                .dispatch("get", move |p| p.get::<T>(id), move |f| f.get::<T>(id))
                .await?
                .is_some();
            if !taken {
                return Ok(candidate);
            }
            millis += 1;
        }
    }

    async fn dispatch<'s, R, PF, FF>(
        &'s self,
        op: &'static str,
        on_primary: impl Fn(&'s P) -> PF,
        on_fallback: impl FnOnce(&'s F) -> FF,
    ) -> Result<R, StoreError>
    where
        PF: Future<Output = Result<R, StoreError>>,
        FF: Future<Output = Result<R, StoreError>>,
    {
        if let Some(primary) = self.primary.as_ref() {
            if self.is_reachable(primary).await {
                match self.with_retry(op, || on_primary(primary)).await {
                    Err(e) if e.is_transient() => {
                        warn!(op, error = %e, "Document store failed, serving from fallback");
                        self.health.record(false);
                    }
                    result => return result,
                }
            }
        }
        on_fallback(&self.fallback).await
    }

    async fn with_retry<R, Fut>(
        &self,
        op: &'static str,
        mut attempt: impl FnMut() -> Fut,
    ) -> Result<R, StoreError>
    where
        Fut: Future<Output = Result<R, StoreError>>,
    {
        let attempts = self.config.attempts.max(1);
        let mut retry = 0;
        loop {
            match attempt().await {
                Err(e) if e.is_transient() && retry + 1 < attempts => {
                    let delay = self.config.backoff(retry);
                    debug!(op, retry, ?delay, error = %e, "Transient failure, retrying");
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                result => return result,
            }
        }
    }

    async fn is_reachable(&self, primary: &P) -> bool {
        if let Some(up) = self.health.fresh(self.config.health_ttl()) {
            return up;
        }

        let up = match timeout(self.config.ping_timeout(), primary.ping()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                debug!(error = %e, "Document store ping failed");
                false
            }
            Err(_) => {
                debug!("Document store ping timed out");
                false
            }
        };

        match (self.health.record(up), up) {
            (Some(false), true) => info!("Document store reachable again"),
            (Some(true) | None, false) => warn!("Document store unreachable, using fallback"),
            _ => {}
        }
        up
    }
}

fn not_found<T: Record>(id: &str) -> StoreError {
    StoreError::NotFound {
        collection: T::COLLECTION,
        id: id.to_string(),
    }
}
