use crate::anilist::api;
use crate::error::SourceError;
use crate::remote::{RemoteListGroup, RemoteMedia};
use crate::traits::MediaSource;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;
use tracker_config::DEFAULT_ANILIST_API_URL;
use tracker_models::MediaKind;

/// Create a reqwest Client identifying this application.
///
/// No timeout is set: a slow AniList response holds the request that asked for it.
pub fn create_anilist_client() -> Client {
    Client::builder()
        .user_agent(concat!("everytracker/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// AniList GraphQL client. Public lists and search need no authentication.
#[derive(Clone)]
pub struct AniListClient {
    client: Arc<Client>,
    api_url: String,
}

impl AniListClient {
    pub fn new() -> Self {
        Self {
            client: Arc::new(create_anilist_client()),
            api_url: DEFAULT_ANILIST_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl Default for AniListClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaSource for AniListClient {
    fn source_name(&self) -> &str {
        "anilist"
    }

    async fn fetch_user_list(
        &self,
        username: &str,
        kind: MediaKind,
    ) -> Result<Vec<RemoteListGroup>, SourceError> {
        info!(username, kind = %kind, "Fetching AniList list");
        api::fetch_user_list(&self.client, &self.api_url, username, kind).await
    }

    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        limit: u32,
    ) -> Result<Vec<RemoteMedia>, SourceError> {
        api::search_media(&self.client, &self.api_url, query, kind, limit).await
    }
}
