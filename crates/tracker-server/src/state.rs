use std::collections::HashMap;
use std::sync::Arc;
use tracker_core::{Reconciler, SharedStore, SyncOrchestrator};
use tracker_sources::SharedSource;

use crate::error::{ApiError, ApiResult};

/// Used when `search_count` is not given
pub const DEFAULT_SEARCH_COUNT: u32 = 10;

#[derive(Clone)]
pub struct AppState {
    pub reconciler: Reconciler,
    pub sources: Arc<HashMap<String, SharedSource>>,
    pub default_search_count: u32,
}

impl AppState {
    pub fn new(store: SharedStore, sources: HashMap<String, SharedSource>) -> Self {
        Self {
            reconciler: Reconciler::new(store),
            sources: Arc::new(sources),
            default_search_count: DEFAULT_SEARCH_COUNT,
        }
    }

    pub fn with_default_search_count(mut self, count: u32) -> Self {
        self.default_search_count = count;
        self
    }

    /// Orchestrator bound to the named source; 404 when no such source is enabled
    pub fn orchestrator(&self, source_name: &str) -> ApiResult<SyncOrchestrator> {
        let source = self
            .sources
            .get(source_name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("unknown source: {}", source_name)))?;
        Ok(SyncOrchestrator::new(source, self.reconciler.clone()))
    }
}
