//! # Domain models for the portfolio content
//!
//! Every entity the site renders lives here. The types are
//! `Serialize + Deserialize` with camelCase field names so the same shape is
//! used on the JSON API, in the document store and in the fallback files.
//!
//! ## Types
//!
//! | Struct | Collection | Kind |
//! |--------|------------|------|
//! | [`Profile`] | `profile` | [`Singleton`] — one record, upserted as a whole. |
//! | [`Link`] | `links` | [`Record`] — curated link in the `work` or `presence` category. |
//! | [`Note`] | `notes` | [`Record`] — markdown note with publish date and audit timestamps. |
//! | [`LearningItem`] | `learning` | [`Record`] — learning log entry with optional resources. |
//!
//! ## Traits
//!
//! [`Record`] and [`Singleton`] are what the storage backends are generic
//! over. A record knows its collection name, its id, how to validate itself,
//! and how a listing of it is ordered.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A document stored in a named collection and addressed by id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Field-level checks run before every create and update.
    fn validate(&self) -> Result<(), StoreError>;

    /// Stamp audit fields. `previous` is the stored version on update.
    fn touch(&mut self, previous: Option<&Self>, now: DateTime<Utc>) {
        let _ = (previous, now);
    }

    /// Order a listing. Insertion order unless overridden.
    fn sort(records: &mut [Self]) {
        let _ = records;
    }
}

/// A collection holding at most one document.
pub trait Singleton: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;

    fn validate(&self) -> Result<(), StoreError>;
}

/// Owner profile shown on the home page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Singleton for Profile {
    const COLLECTION: &'static str = "profile";

    fn validate(&self) -> Result<(), StoreError> {
        require("name", &self.name)?;
        require("title", &self.title)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkCategory {
    #[default]
    Work,
    Presence,
}

impl LinkCategory {
    pub const ALL: [LinkCategory; 2] = [LinkCategory::Work, LinkCategory::Presence];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkCategory::Work => "work",
            LinkCategory::Presence => "presence",
        }
    }
}

impl std::str::FromStr for LinkCategory {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(LinkCategory::Work),
            "presence" => Ok(LinkCategory::Presence),
            other => Err(StoreError::invalid(format!("unknown link category '{other}'"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: LinkCategory,
}

impl Record for Link {
    const COLLECTION: &'static str = "links";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), StoreError> {
        validate_id(&self.id)?;
        require("name", &self.name)?;
        require("url", &self.url)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default)]
    pub id: String,
    pub title: String,
    /// Markdown source.
    #[serde(default)]
    pub content: String,
    /// Publish date.
    #[serde(default = "today")]
    pub date: NaiveDate,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Record for Note {
    const COLLECTION: &'static str = "notes";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), StoreError> {
        validate_id(&self.id)?;
        require("title", &self.title)
    }

    fn touch(&mut self, previous: Option<&Self>, now: DateTime<Utc>) {
        self.created_at = previous.map(|p| p.created_at).unwrap_or(now);
        self.updated_at = now;
    }

    fn sort(records: &mut [Self]) {
        records.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form kind, e.g. "course", "book", "article".
    #[serde(default)]
    pub r#type: String,
    #[serde(default = "today")]
    pub date: NaiveDate,
    #[serde(default)]
    pub resources: Vec<LearningResource>,
}

impl Record for LearningItem {
    const COLLECTION: &'static str = "learning";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), StoreError> {
        validate_id(&self.id)?;
        require("title", &self.title)?;
        for resource in &self.resources {
            require("resource title", &resource.title)?;
            require("resource url", &resource.url)?;
        }
        Ok(())
    }

    fn sort(records: &mut [Self]) {
        records.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

/// Timestamp-derived id for records created without one.
pub fn timestamp_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn require(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        Err(StoreError::invalid(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn validate_id(id: &str) -> Result<(), StoreError> {
    require("id", id)?;
    if id.contains('/') {
        return Err(StoreError::invalid("id must not contain '/'"));
    }
    Ok(())
}
