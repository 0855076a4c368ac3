pub mod config;
pub mod paths;

pub use config::{AniListConfig, Config, DatabaseConfig, ServerConfig, DEFAULT_ANILIST_API_URL, MAX_SEARCH_LIMIT};
pub use paths::{PathManager, BASE_PATH_ENV};
