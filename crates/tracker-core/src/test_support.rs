//! In-process doubles for the remote source and the store.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracker_models::{MediaKind, MediaRecord, StoredRecord, UpdatableField};
use tracker_sources::{MediaSource, RemoteListGroup, RemoteMedia, SourceError};

use crate::sqlite_store::SqliteStore;
use crate::store::{MediaStore, StoreError};

/// Source that serves canned lists and search results
#[derive(Default)]
pub struct FakeSource {
    pub lists: Vec<RemoteListGroup>,
    pub search_results: Vec<RemoteMedia>,
    /// When set, every call fails with this API status
    pub fail_status: Option<u16>,
    pub calls: Mutex<Vec<(String, MediaKind)>>,
}

impl FakeSource {
    pub fn with_lists(lists: Vec<RemoteListGroup>) -> Self {
        Self {
            lists,
            ..Default::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Default::default()
        }
    }

    fn record_call(&self, arg: &str, kind: MediaKind) -> Result<(), SourceError> {
        self.calls.lock().unwrap().push((arg.to_string(), kind));
        match self.fail_status {
            Some(status) => Err(SourceError::api(status, "fake failure")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MediaSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn fetch_user_list(
        &self,
        username: &str,
        kind: MediaKind,
    ) -> Result<Vec<RemoteListGroup>, SourceError> {
        self.record_call(username, kind)?;
        Ok(self.lists.clone())
    }

    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        limit: u32,
    ) -> Result<Vec<RemoteMedia>, SourceError> {
        self.record_call(query, kind)?;
        Ok(self.search_results.iter().take(limit as usize).cloned().collect())
    }
}

/// In-memory SQLite store whose Nth upsert (1-based) fails
pub struct FlakyStore {
    inner: SqliteStore,
    fail_on: usize,
    attempts: AtomicUsize,
}

impl FlakyStore {
    pub fn failing_on(fail_on: usize) -> Self {
        Self {
            inner: SqliteStore::open_in_memory().unwrap(),
            fail_on,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl MediaStore for FlakyStore {
    fn find_all(&self, kind: MediaKind) -> Result<Vec<StoredRecord>, StoreError> {
        self.inner.find_all(kind)
    }

    fn find_by_external_id(
        &self,
        kind: MediaKind,
        external_id: i64,
    ) -> Result<Option<StoredRecord>, StoreError> {
        self.inner.find_by_external_id(kind, external_id)
    }

    fn upsert(
        &self,
        record: &MediaRecord,
        fields: &[UpdatableField],
    ) -> Result<StoredRecord, StoreError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }
        self.inner.upsert(record, fields)
    }
}
