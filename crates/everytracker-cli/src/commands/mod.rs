pub mod config;
pub mod list;
pub mod search;
pub mod serve;
pub mod sync;
pub mod sync_ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;
use tracker_config::{Config, PathManager};
use tracker_core::{Reconciler, SharedStore, SqliteStore, SyncOrchestrator};
use tracker_sources::SourceFactoryRegistry;

/// Config file (or defaults) with environment overrides applied, validated
pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .apply_env_overrides()
        .map_err(|e| eyre!("Invalid environment override: {}", e))?;
    config
        .validate()
        .map_err(|e| eyre!("Configuration validation failed: {}", e))?;
    Ok(config)
}

pub fn open_store(config: &Config, paths: &PathManager) -> Result<SharedStore> {
    let db_path = config.database_path(paths);
    let store = SqliteStore::open(&db_path)
        .map_err(|e| eyre!("Failed to open database {}: {}", db_path.display(), e))?;
    Ok(Arc::new(store))
}

/// Orchestrator for one enabled source over the configured store
pub fn orchestrator(config: &Config, paths: &PathManager, source_name: &str) -> Result<SyncOrchestrator> {
    let registry = SourceFactoryRegistry::new();
    registry
        .validate_all_configs(config)
        .map_err(|e| eyre!("Configuration validation failed: {}", e))?;

    let source = registry
        .create_source_by_name(source_name, config)
        .map_err(|e| eyre!("Failed to create source {}: {}", source_name, e))?
        .ok_or_else(|| {
            eyre!(
                "Source '{}' is not enabled (configured sources: {:?})",
                source_name,
                config.configured_sources()
            )
        })?;

    Ok(SyncOrchestrator::new(source, Reconciler::new(open_store(config, paths)?)))
}
