use std::sync::Arc;
use thiserror::Error;
use tracker_models::{MediaKind, MediaRecord, StoredRecord, UpdatableField};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type SharedStore = Arc<dyn MediaStore>;

/// Persistent collection of media records, unique per (kind, external_id).
///
/// Implementations must make `upsert` atomic: concurrent upserts of the same
/// key never produce two rows.
pub trait MediaStore: Send + Sync {
    /// All records of one kind in insertion order
    fn find_all(&self, kind: MediaKind) -> Result<Vec<StoredRecord>, StoreError>;

    fn find_by_external_id(
        &self,
        kind: MediaKind,
        external_id: i64,
    ) -> Result<Option<StoredRecord>, StoreError>;

    /// Insert the record, or overwrite only `fields` on the existing row.
    ///
    /// Returns the row as stored after the write.
    fn upsert(
        &self,
        record: &MediaRecord,
        fields: &[UpdatableField],
    ) -> Result<StoredRecord, StoreError>;
}
