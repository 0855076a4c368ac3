use thiserror::Error;
use tracker_models::MediaKind;
use tracker_sources::SourceError;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The user's list could not be fetched; nothing was written
    #[error("failed to fetch {kind} list from {source_name}: {source}")]
    RemoteFetch {
        source_name: String,
        kind: MediaKind,
        #[source]
        source: SourceError,
    },

    #[error("{source_name} {kind} search failed: {source}")]
    RemoteSearch {
        source_name: String,
        kind: MediaKind,
        #[source]
        source: SourceError,
    },

    /// Upsert of one record failed; `applied` earlier records stay written
    #[error("failed to store {kind} {external_id} after {applied} records: {source}")]
    Upsert {
        kind: MediaKind,
        external_id: i64,
        applied: usize,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SyncError {
    /// Whether the failure came from the remote side rather than local storage
    pub fn is_remote(&self) -> bool {
        matches!(self, SyncError::RemoteFetch { .. } | SyncError::RemoteSearch { .. })
    }
}
