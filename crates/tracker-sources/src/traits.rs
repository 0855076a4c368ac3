use async_trait::async_trait;
use std::sync::Arc;
use tracker_models::MediaKind;

use crate::error::SourceError;
use crate::remote::{RemoteListGroup, RemoteMedia};

pub type SharedSource = Arc<dyn MediaSource>;

#[async_trait]
pub trait MediaSource: Send + Sync {
    // Source metadata, also the `{source}` path segment
    fn source_name(&self) -> &str;

    /// Fetch a user's complete list for one media kind, grouped as the remote groups it
    async fn fetch_user_list(
        &self,
        username: &str,
        kind: MediaKind,
    ) -> Result<Vec<RemoteListGroup>, SourceError>;

    /// Search the catalog (not a user's list) for media matching `query`
    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        limit: u32,
    ) -> Result<Vec<RemoteMedia>, SourceError>;
}
