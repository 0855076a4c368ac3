use serde::{Deserialize, Serialize};

/// A named group of list entries as returned by the remote (e.g. "Watching",
/// "Completed", or a custom list)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RemoteListGroup {
    pub name: Option<String>,
    pub entries: Vec<RemoteEntry>,
}

/// One entry of a user's list. Everything except the identifiers may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntry {
    /// List entry id (per user)
    pub id: i64,
    /// Catalog id of the media this entry tracks
    pub media_id: i64,
    /// Remote status vocabulary (CURRENT, PLANNING, ...)
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<u32>,
    #[serde(default)]
    pub media: Option<RemoteMedia>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteMedia {
    pub id: i64,
    #[serde(default)]
    pub title: Option<RemoteTitle>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub chapters: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RemoteTitle {
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub romaji: Option<String>,
}

impl RemoteListGroup {
    /// Flatten groups into one ordered sequence of entries
    pub fn flatten(groups: Vec<RemoteListGroup>) -> Vec<RemoteEntry> {
        groups.into_iter().flat_map(|g| g.entries).collect()
    }
}
