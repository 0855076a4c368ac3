pub mod sync;
pub mod reconcile;
pub mod extract;
pub mod status;
pub mod store;
pub mod sqlite_store;
pub mod error;

#[cfg(test)]
mod test_support;

pub use sync::{SyncOrchestrator, SyncReport};
pub use reconcile::Reconciler;
pub use extract::build_record;
pub use status::map_status;
pub use store::{MediaStore, SharedStore, StoreError};
pub use sqlite_store::SqliteStore;
pub use error::SyncError;
