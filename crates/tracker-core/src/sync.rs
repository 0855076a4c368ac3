use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use tracker_models::{MediaKind, SearchResult};
use tracker_sources::{RemoteListGroup, SharedSource};

use crate::error::SyncError;
use crate::extract::{build_record, extract_search_title};
use crate::reconcile::Reconciler;

/// Drives fetch-then-reconcile cycles between one remote source and the store
pub struct SyncOrchestrator {
    source: SharedSource,
    reconciler: Reconciler,
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub source: String,
    pub kind: MediaKind,
    pub username: String,
    pub items_synced: usize,
    pub duration: Duration,
}

impl SyncOrchestrator {
    pub fn new(source: SharedSource, reconciler: Reconciler) -> Self {
        Self { source, reconciler }
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    /// Pull the user's whole list for `kind` and upsert every entry.
    ///
    /// A remote failure aborts before anything is written. A storage failure
    /// stops the batch at that record; records already applied stay.
    #[instrument(skip(self), fields(source = %self.source.source_name()))]
    pub async fn sync_media_kind(
        &self,
        kind: MediaKind,
        username: &str,
    ) -> Result<SyncReport, SyncError> {
        let start = Instant::now();
        info!(
            operation = "sync_start",
            kind = %kind,
            username,
            "Starting {} sync from {}",
            kind,
            self.source_name()
        );

        let groups = self
            .source
            .fetch_user_list(username, kind)
            .await
            .map_err(|source| {
                warn!(
                    operation = "fetch_list",
                    status = "error",
                    error = %source,
                    "Failed to fetch {} list",
                    kind
                );
                SyncError::RemoteFetch {
                    source_name: self.source_name().to_string(),
                    kind,
                    source,
                }
            })?;

        debug!(groups = groups.len(), "Fetched list groups");
        let records: Vec<_> = RemoteListGroup::flatten(groups)
            .iter()
            .map(|entry| build_record(entry, kind))
            .collect();

        let items_synced = self.reconciler.upsert_batch(&records, kind.sync_fields())?;
        let duration = start.elapsed();

        info!(
            operation = "sync_complete",
            kind = %kind,
            items_synced,
            duration_ms = duration.as_millis() as u64,
            "Synced {} {} records",
            items_synced,
            kind
        );

        Ok(SyncReport {
            source: self.source_name().to_string(),
            kind,
            username: username.to_string(),
            items_synced,
            duration,
        })
    }

    /// Search the remote catalog. Nothing is persisted.
    #[instrument(skip(self))]
    pub async fn search_media_kind(
        &self,
        kind: MediaKind,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SearchResult>, SyncError> {
        let media = self
            .source
            .search(query, kind, limit)
            .await
            .map_err(|source| SyncError::RemoteSearch {
                source_name: self.source_name().to_string(),
                kind,
                source,
            })?;

        let results: Vec<SearchResult> = media
            .iter()
            .take(limit as usize)
            .map(|m| SearchResult {
                external_id: m.id,
                title: extract_search_title(m),
                progress_unit: kind.progress_unit(),
            })
            .collect();

        debug!(results = results.len(), "Search complete");
        Ok(results)
    }
}
