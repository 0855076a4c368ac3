use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use tracker_models::{MediaKind, MediaRecord, MediaStatus, StoredRecord, UpdatableField};

use crate::store::{MediaStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS media_items (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    kind             TEXT    NOT NULL,
    external_id      INTEGER NOT NULL,
    title            TEXT    NOT NULL,
    status           TEXT    NOT NULL,
    progress_current INTEGER NOT NULL DEFAULT 0,
    progress_total   INTEGER NOT NULL DEFAULT 0,
    progress_unit    TEXT    NOT NULL,
    created_at       TEXT    NOT NULL,
    updated_at       TEXT    NOT NULL,
    UNIQUE (kind, external_id)
);
"#;

const COLUMNS: &str = "id, kind, external_id, title, status, progress_current, \
                       progress_total, progress_unit, created_at, updated_at";

/// SQLite-backed `MediaStore`.
///
/// One connection guarded by a mutex; every upsert is a single
/// `INSERT .. ON CONFLICT DO UPDATE` statement, so the (kind, external_id)
/// constraint settles races between concurrent writers.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (creating if needed) the database file and apply the schema
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        info!(path = %path.display(), "Opened media database");
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection mutex poisoned".to_string()))
    }
}

/// Build the upsert statement for an allow-list of columns.
///
/// Duplicate fields collapse to one assignment. An empty list still needs a
/// DO UPDATE clause (not DO NOTHING) so RETURNING yields the existing row.
fn upsert_sql(fields: &[UpdatableField]) -> String {
    let mut assignments: Vec<String> = Vec::new();
    for field in fields {
        let assignment = format!("{0} = excluded.{0}", field.column());
        if !assignments.contains(&assignment) {
            assignments.push(assignment);
        }
    }
    if assignments.is_empty() {
        assignments.push("external_id = media_items.external_id".to_string());
    }

    format!(
        "INSERT INTO media_items \
         (kind, external_id, title, status, progress_current, progress_total, progress_unit, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8) \
         ON CONFLICT (kind, external_id) DO UPDATE SET {} \
         RETURNING {}",
        assignments.join(", "),
        COLUMNS
    )
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
    let kind: String = row.get(1)?;
    let kind: MediaKind = kind
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    let status: String = row.get(4)?;
    let status: MediaStatus = status
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    // The unit column is derived from kind on write; kind is the source of truth on read
    let record = MediaRecord::new(kind, row.get(2)?, row.get::<_, String>(3)?, status, row.get(5)?, row.get(6)?);

    Ok(StoredRecord {
        id: row.get(0)?,
        record,
        created_at: row.get::<_, DateTime<Utc>>(8)?,
        updated_at: row.get::<_, DateTime<Utc>>(9)?,
    })
}

impl MediaStore for SqliteStore {
    fn find_all(&self, kind: MediaKind) -> Result<Vec<StoredRecord>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM media_items WHERE kind = ?1 ORDER BY id",
            COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![kind.as_str()], map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn find_by_external_id(
        &self,
        kind: MediaKind,
        external_id: i64,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM media_items WHERE kind = ?1 AND external_id = ?2",
            COLUMNS
        ))?;
        let row = stmt
            .query_row(params![kind.as_str(), external_id], map_row)
            .optional()?;
        Ok(row)
    }

    fn upsert(
        &self,
        record: &MediaRecord,
        fields: &[UpdatableField],
    ) -> Result<StoredRecord, StoreError> {
        let now = Utc::now();
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&upsert_sql(fields))?;
        let stored = stmt.query_row(
            params![
                record.kind.as_str(),
                record.external_id,
                record.title,
                record.status.as_str(),
                record.progress_current,
                record.progress_total,
                record.kind.progress_unit().as_str(),
                now,
            ],
            map_row,
        )?;

        debug!(
            kind = %record.kind,
            external_id = record.external_id,
            id = stored.id,
            "Upserted media record"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_models::{FULL_RESYNC_FIELDS, PARTIAL_UPDATE_FIELDS};

    fn anime(external_id: i64, title: &str, current: u32, total: u32) -> MediaRecord {
        MediaRecord::new(MediaKind::Episodic, external_id, title, MediaStatus::Watching, current, total)
    }

    #[test]
    fn test_insert_then_find() {
        let store = SqliteStore::open_in_memory().unwrap();
        let stored = store.upsert(&anime(21, "One Piece", 5, 12), PARTIAL_UPDATE_FIELDS).unwrap();

        assert!(stored.id > 0);
        assert_eq!(stored.record.title, "One Piece");
        assert_eq!(stored.record.progress_total, 12);
        assert_eq!(stored.created_at, stored.updated_at);

        let found = store.find_by_external_id(MediaKind::Episodic, 21).unwrap().unwrap();
        assert_eq!(found, stored);
        assert!(store.find_by_external_id(MediaKind::Episodic, 99).unwrap().is_none());
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let record = anime(21, "One Piece", 5, 12);

        let first = store.upsert(&record, FULL_RESYNC_FIELDS).unwrap();
        let second = store.upsert(&record, FULL_RESYNC_FIELDS).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.record, second.record);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(store.find_all(MediaKind::Episodic).unwrap().len(), 1);
    }

    #[test]
    fn test_partial_update_keeps_unlisted_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let original = store.upsert(&anime(21, "One Piece", 5, 12), PARTIAL_UPDATE_FIELDS).unwrap();

        let updated = store
            .upsert(&anime(21, "ONE PIECE", 6, 0), PARTIAL_UPDATE_FIELDS)
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.record.title, "ONE PIECE");
        assert_eq!(updated.record.progress_current, 6);
        assert_eq!(updated.record.progress_total, 12);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[test]
    fn test_full_resync_overwrites_total() {
        let store = SqliteStore::open_in_memory().unwrap();
        let manga = |total| {
            MediaRecord::new(MediaKind::ChapterBased, 13, "Berserk", MediaStatus::Reading, 370, total)
        };
        store.upsert(&manga(370), FULL_RESYNC_FIELDS).unwrap();
        let updated = store.upsert(&manga(380), FULL_RESYNC_FIELDS).unwrap();
        assert_eq!(updated.record.progress_total, 380);
    }

    #[test]
    fn test_empty_field_list_returns_existing_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let original = store.upsert(&anime(21, "One Piece", 5, 12), &[]).unwrap();
        let again = store.upsert(&anime(21, "Changed", 9, 99), &[]).unwrap();
        assert_eq!(again, original);
    }

    #[test]
    fn test_duplicate_fields_are_collapsed() {
        let sql = upsert_sql(&[UpdatableField::Title, UpdatableField::Title]);
        assert_eq!(sql.matches("title = excluded.title").count(), 1);

        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert(&anime(21, "One Piece", 5, 12), &[]).unwrap();
        let updated = store
            .upsert(&anime(21, "Renamed", 5, 12), &[UpdatableField::Title, UpdatableField::Title])
            .unwrap();
        assert_eq!(updated.record.title, "Renamed");
    }

    #[test]
    fn test_kinds_do_not_collide() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert(&anime(30, "Shared Id Anime", 1, 12), PARTIAL_UPDATE_FIELDS).unwrap();
        store
            .upsert(
                &MediaRecord::new(MediaKind::ChapterBased, 30, "Shared Id Manga", MediaStatus::PlanToRead, 0, 0),
                FULL_RESYNC_FIELDS,
            )
            .unwrap();

        let anime = store.find_all(MediaKind::Episodic).unwrap();
        let manga = store.find_all(MediaKind::ChapterBased).unwrap();
        assert_eq!(anime.len(), 1);
        assert_eq!(manga.len(), 1);
        assert_eq!(manga[0].record.progress_unit, tracker_models::ProgressUnit::Chapters);
        assert_eq!(manga[0].record.status, MediaStatus::PlanToRead);
    }

    #[test]
    fn test_find_all_in_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for (id, title) in [(3, "C"), (1, "A"), (2, "B")] {
            store.upsert(&anime(id, title, 0, 0), PARTIAL_UPDATE_FIELDS).unwrap();
        }
        let titles: Vec<String> = store
            .find_all(MediaKind::Episodic)
            .unwrap()
            .into_iter()
            .map(|r| r.record.title)
            .collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_concurrent_upserts_produce_one_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .upsert(&anime(77, "Race", i, 24), PARTIAL_UPDATE_FIELDS)
                        .unwrap()
                        .id
                })
            })
            .collect();

        let ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.iter().all(|id| *id == ids[0]));
        assert_eq!(store.find_all(MediaKind::Episodic).unwrap().len(), 1);
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("tracker.sqlite");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.upsert(&anime(21, "One Piece", 5, 12), PARTIAL_UPDATE_FIELDS).unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        let rows = reopened.find_all(MediaKind::Episodic).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.title, "One Piece");
    }
}
