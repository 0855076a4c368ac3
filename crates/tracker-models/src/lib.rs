pub mod fields;
pub mod kind;
pub mod media;
pub mod status;

pub use fields::{UpdatableField, FULL_RESYNC_FIELDS, PARTIAL_UPDATE_FIELDS};
pub use kind::{MediaKind, ParseKindError, ProgressUnit};
pub use media::{MediaRecord, SearchResult, StoredRecord, UNKNOWN_TITLE};
pub use status::{MediaStatus, ParseStatusError};
