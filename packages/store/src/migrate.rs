//! Copy of the JSON fallback data into the document store.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::Backend;
use crate::error::StoreError;
use crate::models::{LearningItem, Link, Note, Profile, Record};

/// Number of records copied per collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub profile: bool,
    pub links: usize,
    pub notes: usize,
    pub learning: usize,
}

/// Upsert every record of `source` into `target`, keyed by id.
pub async fn copy_all<S: Backend, D: Backend>(
    source: &S,
    target: &D,
) -> Result<MigrationReport, StoreError> {
    let mut report = MigrationReport {
        links: copy_collection::<Link, _, _>(source, target).await?,
        notes: copy_collection::<Note, _, _>(source, target).await?,
        learning: copy_collection::<LearningItem, _, _>(source, target).await?,
        ..Default::default()
    };

    if let Some(profile) = source.load::<Profile>().await? {
        target.save(&profile).await?;
        report.profile = true;
    }
    Ok(report)
}

async fn copy_collection<T: Record, S: Backend, D: Backend>(
    source: &S,
    target: &D,
) -> Result<usize, StoreError> {
    let rows = source.list::<T>().await?;
    for row in &rows {
        if !target.replace(row).await? {
            target.insert(row).await?;
        }
    }
    debug!(collection = T::COLLECTION, count = rows.len(), "Collection copied");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_store::FileStore;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn test_copy_from_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("notes.json"),
            r#"[{"id": "1", "title": "Hello", "content": "*hi*", "date": "2024-01-01",
                 "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        let source = FileStore::new(dir.path());
        let target = MemoryStore::new();

        let report = copy_all(&source, &target).await.unwrap();
        assert_eq!(
            report,
            MigrationReport {
                profile: false,
                links: 0,
                notes: 1,
                learning: 0,
            }
        );
        let notes = target.list::<Note>().await.unwrap();
        assert_eq!(notes[0].content, "*hi*");

        // Running again upserts instead of duplicating.
        copy_all(&source, &target).await.unwrap();
        assert_eq!(target.list::<Note>().await.unwrap().len(), 1);
    }
}
