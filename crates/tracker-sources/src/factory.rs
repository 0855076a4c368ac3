//! Source factory pattern for creating media sources from configuration
//!
//! Source construction lives here so the server and the CLI build the same
//! set of sources from the same config.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracker_config::Config;

use crate::traits::{MediaSource, SharedSource};

/// Factory trait for creating media sources from configuration
pub trait SourceFactory: Send + Sync {
    /// The name of the source this factory creates
    fn source_name(&self) -> &str;

    /// Create a source instance from configuration
    /// Returns None if the source is not enabled or not configured
    fn create_source(&self, config: &Config) -> Result<Option<SharedSource>>;

    /// Validate that the source configuration is valid
    /// This is called before attempting to create the source
    fn validate_config(&self, config: &Config) -> Result<()>;
}

/// Registry of source factories
pub struct SourceFactoryRegistry {
    factories: HashMap<String, Box<dyn SourceFactory>>,
}

impl SourceFactoryRegistry {
    /// Create a new registry with all built-in factories registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register(Box::new(anilist::AniListSourceFactory));

        registry
    }

    /// Register a new factory
    pub fn register(&mut self, factory: Box<dyn SourceFactory>) {
        self.factories.insert(factory.source_name().to_string(), factory);
    }

    /// Create all enabled sources from configuration, keyed by source name
    pub fn create_all_sources(&self, config: &Config) -> Result<HashMap<String, SharedSource>> {
        let mut sources = HashMap::new();

        for factory in self.factories.values() {
            if let Some(source) = factory.create_source(config)? {
                sources.insert(source.source_name().to_string(), source);
            }
        }

        Ok(sources)
    }

    /// Create a specific source by name
    pub fn create_source_by_name(&self, name: &str, config: &Config) -> Result<Option<SharedSource>> {
        match self.factories.get(name) {
            Some(factory) => factory.create_source(config),
            None => Ok(None),
        }
    }

    /// Validate all source configurations
    pub fn validate_all_configs(&self, config: &Config) -> Result<()> {
        for factory in self.factories.values() {
            factory.validate_config(config)?;
        }
        Ok(())
    }

    /// Check if a source is registered
    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for SourceFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Factory implementations for each source
mod anilist {
    use super::*;
    use crate::anilist::AniListClient;

    pub struct AniListSourceFactory;

    impl SourceFactory for AniListSourceFactory {
        fn source_name(&self) -> &str {
            "anilist"
        }

        fn create_source(&self, config: &Config) -> Result<Option<SharedSource>> {
            let anilist = match &config.anilist {
                Some(anilist) if anilist.enabled => anilist,
                _ => return Ok(None),
            };

            let client = AniListClient::new().with_api_url(anilist.api_url.clone());
            Ok(Some(Arc::new(client) as Arc<dyn MediaSource>))
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if let Some(anilist) = &config.anilist {
                if anilist.enabled && anilist.api_url.trim().is_empty() {
                    return Err(anyhow::anyhow!("AniList is enabled but api_url is empty"));
                }
            }
            Ok(())
        }
    }
}
