pub mod client;
pub mod api;

pub use client::{AniListClient, create_anilist_client};
