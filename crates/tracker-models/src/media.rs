use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::{MediaKind, ProgressUnit};
use crate::status::MediaStatus;

/// Title used when the remote source has neither an English nor a Romaji title
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Canonical local representation of a tracked anime or manga.
///
/// Both kinds share the same field set; `kind` tells them apart and fixes
/// `progress_unit`. `external_id` is the remote catalog's media id and is
/// unique per kind in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaRecord {
    pub kind: MediaKind,
    pub title: String,
    pub external_id: i64,
    pub status: MediaStatus,
    pub progress_current: u32,
    pub progress_total: u32,
    pub progress_unit: ProgressUnit,
}

impl MediaRecord {
    pub fn new(
        kind: MediaKind,
        external_id: i64,
        title: impl Into<String>,
        status: MediaStatus,
        progress_current: u32,
        progress_total: u32,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            external_id,
            status,
            progress_current,
            progress_total,
            progress_unit: kind.progress_unit(),
        }
    }
}

/// A record as persisted, with the metadata the store maintains
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRecord {
    pub id: i64,
    #[serde(flatten)]
    pub record: MediaRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A remote search hit. Carries no user state, so no status or progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub external_id: i64,
    pub title: String,
    pub progress_unit: ProgressUnit,
}
