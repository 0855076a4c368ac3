use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Overrides every location with a single root, as used by the container image
pub const BASE_PATH_ENV: &str = "EVERYTRACKER_BASE_PATH";

const APP_DIR: &str = "everytracker";

/// Where the tracker keeps its config file, database and logs
#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    /// `$EVERYTRACKER_BASE_PATH` when set, otherwise the platform config and data dirs
    pub fn resolve() -> Result<Self> {
        match std::env::var_os(BASE_PATH_ENV) {
            Some(base) if !base.is_empty() => Ok(Self::with_base(base)),
            _ => Self::platform(),
        }
    }

    /// Platform dirs, e.g. `~/.config/everytracker` and `~/.local/share/everytracker` on Linux
    pub fn platform() -> Result<Self> {
        let config_root = dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        let data_root = dirs::data_local_dir().unwrap_or_else(|| config_root.clone());
        Ok(Self {
            config_dir: config_root.join(APP_DIR),
            data_dir: data_root.join(APP_DIR),
        })
    }

    /// Config file directly under `base`, database and logs in `base/data`
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            data_dir: base.join("data"),
            config_dir: base,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_file(&self) -> PathBuf {
        self.data_dir.join("tracker.sqlite")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn server_log_file(&self) -> PathBuf {
        self.log_dir().join("everytracker.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [self.config_dir.clone(), self.log_dir()] {
            std::fs::create_dir_all(&dir)
                .map_err(|e| anyhow!("Failed to create {}: {}", dir.display(), e))?;
        }
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Hosts without a home directory still get a usable relative layout
        Self::resolve().unwrap_or_else(|_| Self::with_base(APP_DIR))
    }
}
