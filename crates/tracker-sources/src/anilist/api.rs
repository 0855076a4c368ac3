use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use tracker_models::MediaKind;

use crate::error::SourceError;
use crate::remote::{RemoteEntry, RemoteListGroup, RemoteMedia};

const USER_LIST_QUERY: &str = r#"
query ($userName: String, $type: MediaType) {
  MediaListCollection(userName: $userName, type: $type) {
    lists {
      name
      entries {
        id
        mediaId
        status
        progress
        media {
          id
          episodes
          chapters
          title { english romaji }
        }
      }
    }
  }
}
"#;

const SEARCH_QUERY: &str = r#"
query ($search: String, $type: MediaType, $perPage: Int) {
  Page(page: 1, perPage: $perPage) {
    media(search: $search, type: $type) {
      id
      episodes
      chapters
      title { english romaji }
    }
  }
}
"#;

/// AniList rejects larger pages
const MAX_PER_PAGE: u32 = 50;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    status: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ListCollectionData {
    #[serde(rename = "MediaListCollection")]
    collection: Option<RawCollection>,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(default)]
    lists: Option<Vec<Option<RawListGroup>>>,
}

// Entries stay untyped until each one is decoded on its own, so a single
// bad entry cannot fail the whole collection
#[derive(Debug, Deserialize)]
struct RawListGroup {
    name: Option<String>,
    #[serde(default)]
    entries: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(rename = "Page")]
    page: Option<RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    media: Option<Vec<Value>>,
}

/// AniList `MediaType` enum value for a kind
pub fn media_type(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Episodic => "ANIME",
        MediaKind::ChapterBased => "MANGA",
    }
}

/// Fetch a user's full list for one kind
pub async fn fetch_user_list(
    client: &Client,
    api_url: &str,
    username: &str,
    kind: MediaKind,
) -> Result<Vec<RemoteListGroup>, SourceError> {
    let variables = json!({
        "userName": username,
        "type": media_type(kind),
    });

    let data: ListCollectionData = post_graphql(client, api_url, USER_LIST_QUERY, variables).await?;
    let groups = parse_list_collection(data)?;

    debug!(
        username,
        kind = %kind,
        groups = groups.len(),
        entries = groups.iter().map(|g| g.entries.len()).sum::<usize>(),
        "Fetched AniList user list"
    );
    Ok(groups)
}

/// Search the AniList catalog
pub async fn search_media(
    client: &Client,
    api_url: &str,
    query: &str,
    kind: MediaKind,
    limit: u32,
) -> Result<Vec<RemoteMedia>, SourceError> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let variables = json!({
        "search": query,
        "type": media_type(kind),
        "perPage": limit.min(MAX_PER_PAGE),
    });

    let data: SearchData = post_graphql(client, api_url, SEARCH_QUERY, variables).await?;
    let mut media = parse_search_page(data)?;
    media.truncate(limit as usize);
    Ok(media)
}

async fn post_graphql<T: DeserializeOwned>(
    client: &Client,
    api_url: &str,
    query: &str,
    variables: Value,
) -> Result<T, SourceError> {
    let response = client
        .post(api_url)
        .header("Accept", "application/json")
        .json(&json!({ "query": query, "variables": variables }))
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    decode_response(status, &body)
}

/// Turn an HTTP status and GraphQL body into data or a `SourceError`
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, SourceError> {
    let parsed: GraphQlResponse<T> = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            if !status.is_success() {
                return Err(SourceError::api(status.as_u16(), truncate(body, 200)));
            }
            return Err(SourceError::InvalidResponse(format!("could not decode body: {}", e)));
        }
    };

    if !parsed.errors.is_empty() {
        let code = parsed
            .errors
            .iter()
            .find_map(|e| e.status)
            .unwrap_or_else(|| status.as_u16());
        let message = parsed
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SourceError::api(code, message));
    }

    if !status.is_success() {
        return Err(SourceError::api(status.as_u16(), truncate(body, 200)));
    }

    parsed
        .data
        .ok_or_else(|| SourceError::InvalidResponse("response has no data".to_string()))
}

fn parse_list_collection(data: ListCollectionData) -> Result<Vec<RemoteListGroup>, SourceError> {
    let collection = data
        .collection
        .ok_or_else(|| SourceError::InvalidResponse("MediaListCollection is missing".to_string()))?;

    let groups = collection
        .lists
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|group| RemoteListGroup {
            entries: decode_each::<RemoteEntry>(group.entries.unwrap_or_default(), "list entry"),
            name: group.name,
        })
        .collect();

    Ok(groups)
}

fn parse_search_page(data: SearchData) -> Result<Vec<RemoteMedia>, SourceError> {
    let page = data
        .page
        .ok_or_else(|| SourceError::InvalidResponse("Page is missing".to_string()))?;
    Ok(decode_each::<RemoteMedia>(page.media.unwrap_or_default(), "search result"))
}

/// Decode every element on its own; nulls are dropped, undecodable ones are logged and skipped
fn decode_each<T: DeserializeOwned>(values: Vec<Value>, what: &str) -> Vec<T> {
    values
        .into_iter()
        .filter(|v| !v.is_null())
        .filter_map(|value| {
            let id = value.get("id").cloned();
            match serde_json::from_value::<T>(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(id = ?id, error = %e, "Skipping malformed AniList {}", what);
                    None
                }
            }
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
