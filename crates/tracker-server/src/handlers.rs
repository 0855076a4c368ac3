use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use tracker_models::{
    MediaKind, MediaRecord, MediaStatus, SearchResult, StoredRecord, PARTIAL_UPDATE_FIELDS,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body of `POST /items/{kind}`; the kind and unit come from the path
#[derive(Debug, Deserialize)]
pub struct NewMediaItem {
    pub title: String,
    pub external_id: i64,
    pub status: MediaStatus,
    #[serde(default)]
    pub progress_current: u32,
    #[serde(default)]
    pub progress_total: u32,
}

impl NewMediaItem {
    fn into_record(self, kind: MediaKind) -> ApiResult<MediaRecord> {
        if self.title.trim().is_empty() {
            return Err(ApiError::BadRequest("title must not be empty".to_string()));
        }
        Ok(MediaRecord::new(
            kind,
            self.external_id,
            self.title,
            self.status,
            self.progress_current,
            self.progress_total,
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct SyncParams {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub message: String,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    // Parsed by hand so a bad value gets the JSON error body
    pub search_count: Option<String>,
}

fn parse_kind(kind: &str) -> ApiResult<MediaKind> {
    kind.parse()
        .map_err(|_| ApiError::NotFound(format!("unknown media kind: {}", kind)))
}

fn required(value: Option<String>, message: &str) -> ApiResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_items(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<Json<Vec<StoredRecord>>> {
    let kind = parse_kind(&kind)?;
    Ok(Json(state.reconciler.list_media_kind(kind)?))
}

/// Create or update one record by `external_id`; progress_total of an existing row is kept
pub async fn create_item(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: Result<Json<NewMediaItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StoredRecord>)> {
    let kind = parse_kind(&kind)?;
    let Json(item) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let record = item.into_record(kind)?;

    let stored = state.reconciler.upsert(&record, PARTIAL_UPDATE_FIELDS)?;
    info!(
        operation = "manual_upsert",
        kind = %kind,
        external_id = stored.record.external_id,
        id = stored.id,
        "Stored {} record",
        kind
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn sync_source(
    State(state): State<AppState>,
    Path((source, kind)): Path<(String, String)>,
    Query(params): Query<SyncParams>,
) -> ApiResult<Json<SyncResponse>> {
    let kind = parse_kind(&kind)?;
    let orchestrator = state.orchestrator(&source)?;
    let username = required(params.username, "username query parameter is required")?;

    let report = orchestrator.sync_media_kind(kind, &username).await?;
    Ok(Json(SyncResponse {
        message: "Sync Complete".to_string(),
        count: report.items_synced,
    }))
}

pub async fn search_source(
    State(state): State<AppState>,
    Path((source, kind)): Path<(String, String)>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<SearchResult>>> {
    let kind = parse_kind(&kind)?;
    let orchestrator = state.orchestrator(&source)?;
    let query = required(params.query, "query parameter is required")?;
    let limit = match params.search_count.as_deref() {
        None | Some("") => state.default_search_count,
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            ApiError::BadRequest(format!("search_count must be a non-negative integer, got '{}'", raw))
        })?,
    };

    let results = orchestrator.search_media_kind(kind, &query, limit).await?;
    Ok(Json(results))
}
