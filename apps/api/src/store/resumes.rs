//! Resume Store — list/append/remove over one persisted JSON array.
//!
//! Every mutation reads the whole collection, changes it in memory and
//! writes the whole collection back. There is no lock around that cycle:
//! one writer at a time is assumed, and two racing writers can lose an
//! append.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{info, warn};

use crate::models::resume::{ResumeDocument, SavedResumeRecord};
use crate::store::{KeyValueStore, StorageError};

/// Key of the persisted collection.
pub const RESUMES_KEY: &str = "resumes";

#[derive(Clone)]
pub struct ResumeStore {
    backend: Arc<dyn KeyValueStore>,
    last_id: Arc<AtomicI64>,
}

impl ResumeStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            last_id: Arc::new(AtomicI64::new(0)),
        }
    }

    /// Reads the whole collection. Absent key → empty; corrupt blob → error.
    pub async fn list(&self) -> Result<Vec<SavedResumeRecord>, StorageError> {
        let Some(blob) = self.backend.get(RESUMES_KEY).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&blob).map_err(|source| {
            warn!("Persisted collection '{RESUMES_KEY}' failed to parse: {source}");
            StorageError::Corrupt {
                key: RESUMES_KEY.to_string(),
                source,
            }
        })
    }

    pub async fn get(&self, id: &str) -> Result<Option<SavedResumeRecord>, StorageError> {
        Ok(self.list().await?.into_iter().find(|r| r.id == id))
    }

    /// Stamps `doc` with a fresh id and `createdAt`, then appends it.
    pub async fn append(&self, doc: ResumeDocument) -> Result<SavedResumeRecord, StorageError> {
        // Persisted timestamps carry milliseconds; keep the returned record identical.
        let now = Utc::now().trunc_subsecs(3);
        let mut records = self.list().await?;

        let record = SavedResumeRecord {
            id: self.next_id(now, &records),
            data: doc,
            created_at: now,
        };
        records.push(record.clone());
        self.write(&records).await?;

        info!(
            "Saved resume {} ({} records total)",
            record.id,
            records.len()
        );
        Ok(record)
    }

    /// Drops the record with `id` and returns what is left. An unknown id
    /// changes nothing and the collection is not rewritten.
    pub async fn remove(&self, id: &str) -> Result<Vec<SavedResumeRecord>, StorageError> {
        let mut records = self.list().await?;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() != before {
            self.write(&records).await?;
            info!("Deleted resume {id}");
        }
        Ok(records)
    }

    async fn write(&self, records: &[SavedResumeRecord]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(records).map_err(StorageError::Serialize)?;
        self.backend.set(RESUMES_KEY, blob).await
    }

    /// Milliseconds since the epoch, bumped past anything already issued or
    /// stored so ids stay strictly increasing within the collection.
    ///
    /// Stored ids that cannot be bumped (`i64::MAX`) are skipped; they are
    /// not millisecond clocks anyway.
    fn next_id(&self, now: DateTime<Utc>, existing: &[SavedResumeRecord]) -> String {
        let floor = existing
            .iter()
            .filter_map(|r| r.id.parse::<i64>().ok())
            .filter_map(|id| id.checked_add(1))
            .fold(now.timestamp_millis(), i64::max);

        let mut issued = self.last_id.load(Ordering::SeqCst);
        loop {
            let candidate = floor.max(issued.saturating_add(1));
            match self.last_id.compare_exchange(
                issued,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(current) => issued = current,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::store::{FileKeyValueStore, MemoryKeyValueStore};

    fn memory_store() -> (ResumeStore, Arc<MemoryKeyValueStore>) {
        let backend = Arc::new(MemoryKeyValueStore::new());
        (ResumeStore::new(backend.clone()), backend)
    }

    fn resume(name: &str) -> ResumeDocument {
        ResumeDocument::try_from(json!({
            "personalInfo": {"fullName": name, "email": "x@y.com", "phone": "1"},
            "summary": "Engineer",
            "skills": ["Go"]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_is_empty_when_nothing_saved() {
        let (store, _) = memory_store();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_list_returns_document_last() {
        let (store, _) = memory_store();
        store.append(resume("First")).await.unwrap();
        let saved = store.append(resume("Jane Doe")).await.unwrap();

        let records = store.list().await.unwrap();
        let last = records.last().unwrap();
        assert_eq!(last.data, resume("Jane Doe"));
        assert_eq!(last, &saved);
        assert!(last.id.parse::<i64>().unwrap() > 0);
        assert!(last.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_two_appends_get_distinct_ids_in_insertion_order() {
        let (store, _) = memory_store();
        let a = store.append(resume("A")).await.unwrap();
        let b = store.append(resume("B")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(b.id.parse::<i64>().unwrap() > a.id.parse::<i64>().unwrap());

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|r| r.data.display_name().to_string())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_ids_skip_past_ids_already_stored() {
        let future_id = Utc::now().timestamp_millis() + 60_000;
        let blob = json!([{
            "id": future_id.to_string(),
            "data": {"summary": "old"},
            "createdAt": "2024-01-01T00:00:00.000Z"
        }]);
        let backend = Arc::new(MemoryKeyValueStore::with_entry(RESUMES_KEY, blob.to_string()));
        let store = ResumeStore::new(backend);

        let record = store.append(resume("New")).await.unwrap();
        assert_eq!(record.id, (future_id + 1).to_string());
    }

    #[tokio::test]
    async fn test_unbumpable_stored_id_does_not_break_append() {
        let blob = json!([{
            "id": i64::MAX.to_string(),
            "data": {"summary": "imported"},
            "createdAt": "2024-01-01T00:00:00.000Z"
        }]);
        let backend = Arc::new(MemoryKeyValueStore::with_entry(RESUMES_KEY, blob.to_string()));
        let store = ResumeStore::new(backend);
        assert_eq!(store.list().await.unwrap().len(), 1);

        let a = store.append(resume("A")).await.unwrap();
        let b = store.append(resume("B")).await.unwrap();
        assert_ne!(a.id, i64::MAX.to_string());
        assert!(b.id.parse::<i64>().unwrap() > a.id.parse::<i64>().unwrap());
        assert_eq!(store.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_remove_drops_only_that_id() {
        let (store, _) = memory_store();
        let a = store.append(resume("A")).await.unwrap();
        let b = store.append(resume("B")).await.unwrap();

        let remaining = store.remove(&a.id).await.unwrap();
        assert_eq!(remaining, vec![b.clone()]);
        assert_eq!(store.list().await.unwrap(), vec![b]);
        assert!(store.get(&a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_a_no_op() {
        let (store, _) = memory_store();
        store.append(resume("A")).await.unwrap();
        let before = store.list().await.unwrap();

        let after = store.remove("does-not-exist").await.unwrap();
        assert_eq!(after, before);
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_remove_on_empty_store_does_not_create_the_key() {
        let (store, backend) = memory_store();
        assert!(store.remove("1").await.unwrap().is_empty());
        assert_eq!(backend.get(RESUMES_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_an_error_not_empty() {
        let backend = Arc::new(MemoryKeyValueStore::with_entry(RESUMES_KEY, "{not json"));
        let store = ResumeStore::new(backend.clone());

        assert!(matches!(
            store.list().await,
            Err(StorageError::Corrupt { .. })
        ));
        // A failed read must not be papered over by the next write.
        assert!(store.append(resume("A")).await.is_err());
        assert_eq!(
            backend.get(RESUMES_KEY).await.unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn test_reads_collection_written_by_older_clients() {
        let blob = r#"[{"id":"1717171717171","data":{"personalInfo":{"fullName":"Jane Doe"},"experience":[{"company":"Acme"}]},"createdAt":"2024-05-31T16:08:37.171Z"}]"#;
        let backend = Arc::new(MemoryKeyValueStore::with_entry(RESUMES_KEY, blob));
        let store = ResumeStore::new(backend);

        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data.display_name(), "Jane Doe");
        assert_eq!(
            store.get("1717171717171").await.unwrap().unwrap().data.sections()[0].title,
            "Work Experience"
        );
    }

    #[tokio::test]
    async fn test_file_backend_persists_across_store_instances() {
        let dir = tempfile::tempdir().unwrap();
        let first = ResumeStore::new(Arc::new(FileKeyValueStore::new(dir.path())));
        let saved = first.append(resume("Jane Doe")).await.unwrap();

        let second = ResumeStore::new(Arc::new(FileKeyValueStore::new(dir.path())));
        assert_eq!(second.list().await.unwrap(), vec![saved]);
    }
}
