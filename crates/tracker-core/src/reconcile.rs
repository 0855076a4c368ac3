use tracing::debug;
use tracker_models::{MediaKind, MediaRecord, StoredRecord, UpdatableField};

use crate::error::SyncError;
use crate::store::{SharedStore, StoreError};

/// Applies records to the store with a field allow-list.
///
/// Batches are written one record at a time in order. There is no enclosing
/// transaction: when a record fails, the ones before it stay written and the
/// ones after it are not attempted.
#[derive(Clone)]
pub struct Reconciler {
    store: SharedStore,
}

impl Reconciler {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All stored records of one kind, oldest first
    pub fn list_media_kind(&self, kind: MediaKind) -> Result<Vec<StoredRecord>, StoreError> {
        self.store.find_all(kind)
    }

    pub fn upsert(
        &self,
        record: &MediaRecord,
        fields: &[UpdatableField],
    ) -> Result<StoredRecord, StoreError> {
        self.store.upsert(record, fields)
    }

    /// Returns the number of records applied
    pub fn upsert_batch(
        &self,
        records: &[MediaRecord],
        fields: &[UpdatableField],
    ) -> Result<usize, SyncError> {
        for (applied, record) in records.iter().enumerate() {
            self.store
                .upsert(record, fields)
                .map_err(|source| SyncError::Upsert {
                    kind: record.kind,
                    external_id: record.external_id,
                    applied,
                    source,
                })?;
        }

        debug!(count = records.len(), "Applied record batch");
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite_store::SqliteStore;
    use crate::store::MediaStore;
    use crate::test_support::FlakyStore;
    use std::sync::Arc;
    use tracker_models::{MediaStatus, PARTIAL_UPDATE_FIELDS};

    fn records() -> Vec<MediaRecord> {
        (1..=3)
            .map(|i| MediaRecord::new(MediaKind::Episodic, i, format!("Show {i}"), MediaStatus::Watching, 1, 12))
            .collect()
    }

    #[test]
    fn test_batch_applies_all_in_order() {
        let reconciler = Reconciler::new(Arc::new(SqliteStore::open_in_memory().unwrap()));

        assert_eq!(reconciler.upsert_batch(&records(), PARTIAL_UPDATE_FIELDS).unwrap(), 3);
        assert!(reconciler.list_media_kind(MediaKind::ChapterBased).unwrap().is_empty());
        let ids: Vec<i64> = reconciler
            .list_media_kind(MediaKind::Episodic)
            .unwrap()
            .iter()
            .map(|r| r.record.external_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_batch() {
        let reconciler = Reconciler::new(Arc::new(SqliteStore::open_in_memory().unwrap()));
        assert_eq!(reconciler.upsert_batch(&[], PARTIAL_UPDATE_FIELDS).unwrap(), 0);
    }

    #[test]
    fn test_batch_stops_at_first_failure() {
        let store = Arc::new(FlakyStore::failing_on(2));
        let reconciler = Reconciler::new(store.clone());

        let err = reconciler.upsert_batch(&records(), PARTIAL_UPDATE_FIELDS).unwrap_err();
        match err {
            SyncError::Upsert { external_id, applied, .. } => {
                assert_eq!(external_id, 2);
                assert_eq!(applied, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let written: Vec<i64> = store
            .find_all(MediaKind::Episodic)
            .unwrap()
            .iter()
            .map(|r| r.record.external_id)
            .collect();
        assert_eq!(written, vec![1]);
        assert_eq!(store.attempts(), 2);
    }
}
