use serde::{Deserialize, Serialize};

/// A column an upsert may overwrite when the row already exists.
///
/// Fields not named in an allow-list keep their stored value on conflict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UpdatableField {
    Title,
    Status,
    ProgressCurrent,
    ProgressTotal,
    UpdatedAt,
}

impl UpdatableField {
    pub fn column(&self) -> &'static str {
        match self {
            UpdatableField::Title => "title",
            UpdatableField::Status => "status",
            UpdatableField::ProgressCurrent => "progress_current",
            UpdatableField::ProgressTotal => "progress_total",
            UpdatableField::UpdatedAt => "updated_at",
        }
    }
}

/// Manual updates and anime syncs
pub const PARTIAL_UPDATE_FIELDS: &[UpdatableField] = &[
    UpdatableField::Title,
    UpdatableField::Status,
    UpdatableField::ProgressCurrent,
    UpdatableField::UpdatedAt,
];

/// Manga syncs, where the published total can change between runs
pub const FULL_RESYNC_FIELDS: &[UpdatableField] = &[
    UpdatableField::Title,
    UpdatableField::Status,
    UpdatableField::ProgressCurrent,
    UpdatableField::ProgressTotal,
    UpdatableField::UpdatedAt,
];
