use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::PathManager;

pub const DEFAULT_ANILIST_API_URL: &str = "https://graphql.anilist.co";

/// AniList rejects `perPage` values above this
pub const MAX_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default = "default_anilist_config")]
    pub anilist: Option<AniListConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DatabaseConfig {
    /// SQLite file; defaults to `<data_dir>/tracker.sqlite`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AniListConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Used by `everytracker sync` when no --username is given
    #[serde(default)]
    pub default_username: Option<String>,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_url() -> String {
    DEFAULT_ANILIST_API_URL.to_string()
}

fn default_search_limit() -> u32 {
    10
}

fn default_anilist_config() -> Option<AniListConfig> {
    Some(AniListConfig::default())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for AniListConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            api_url: default_api_url(),
            default_username: None,
            search_limit: default_search_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            anilist: default_anilist_config(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Apply `PORT` and `EVERYTRACKER_DATABASE` from the process environment
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
            self.server.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got '{}'", port))?;
        }
        if let Some(path) = lookup("EVERYTRACKER_DATABASE").filter(|p| !p.is_empty()) {
            self.database.path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.host.is_empty() {
            return Err(anyhow::anyhow!("server.host cannot be empty"));
        }

        if let Some(anilist) = &self.anilist {
            if anilist.enabled {
                if !anilist.api_url.starts_with("http://") && !anilist.api_url.starts_with("https://") {
                    return Err(anyhow::anyhow!("anilist.api_url must be an http(s) URL, got '{}'", anilist.api_url));
                }
                if anilist.search_limit == 0 || anilist.search_limit > MAX_SEARCH_LIMIT {
                    return Err(anyhow::anyhow!(
                        "anilist.search_limit must be between 1 and {}",
                        MAX_SEARCH_LIMIT
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn database_path(&self, paths: &PathManager) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| paths.database_file())
    }

    pub fn is_anilist_configured(&self) -> bool {
        self.anilist.as_ref().map(|a| a.enabled).unwrap_or(false)
    }

    /// Get list of configured and enabled sources
    pub fn configured_sources(&self) -> Vec<String> {
        let mut sources = Vec::new();
        if self.is_anilist_configured() {
            sources.push("anilist".to_string());
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9000,
            },
            database: DatabaseConfig {
                path: Some(PathBuf::from("/tmp/tracker.sqlite")),
            },
            anilist: Some(AniListConfig {
                default_username: Some("someone".to_string()),
                ..AniListConfig::default()
            }),
        };

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[server]\nport = 3000\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.is_anilist_configured());
        assert_eq!(config.anilist.as_ref().unwrap().api_url, DEFAULT_ANILIST_API_URL);
        assert_eq!(config.configured_sources(), vec!["anilist".to_string()]);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.anilist.as_mut().unwrap().search_limit = 0;
        assert!(config.validate().is_err());

        config.anilist.as_mut().unwrap().search_limit = 10;
        config.anilist.as_mut().unwrap().api_url = "graphql.anilist.co".to_string();
        assert!(config.validate().is_err());

        // Disabled sources are not validated
        config.anilist.as_mut().unwrap().enabled = false;
        assert!(config.validate().is_ok());
        assert!(config.configured_sources().is_empty());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("PORT", "8181"), ("EVERYTRACKER_DATABASE", "/data/t.sqlite")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config
            .apply_overrides_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 8181);
        let paths = PathManager::with_base("/unused");
        assert_eq!(config.database_path(&paths), PathBuf::from("/data/t.sqlite"));
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = Config::default();
        let result = config.apply_overrides_from(|key| (key == "PORT").then(|| "eighty".to_string()));
        assert!(result.is_err());
    }
}
