use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::fields::{UpdatableField, FULL_RESYNC_FIELDS, PARTIAL_UPDATE_FIELDS};

/// The two kinds of media the tracker knows about.
///
/// Episodic media (anime) is tracked in episodes, chapter-based media (manga)
/// in chapters. The kind is the discriminant on every stored record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    #[serde(rename = "anime")]
    Episodic,
    #[serde(rename = "manga")]
    ChapterBased,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Episodic, MediaKind::ChapterBased];

    /// Path segment and storage value ("anime" / "manga")
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Episodic => "anime",
            MediaKind::ChapterBased => "manga",
        }
    }

    pub fn progress_unit(&self) -> ProgressUnit {
        match self {
            MediaKind::Episodic => ProgressUnit::Episodes,
            MediaKind::ChapterBased => ProgressUnit::Chapters,
        }
    }

    /// Fields a sync is allowed to overwrite on an existing row.
    ///
    /// Chapter-based totals keep moving while a series is ongoing, so manga
    /// syncs also refresh `progress_total`. Anime totals are left as first
    /// written.
    pub fn sync_fields(&self) -> &'static [UpdatableField] {
        match self {
            MediaKind::Episodic => PARTIAL_UPDATE_FIELDS,
            MediaKind::ChapterBased => FULL_RESYNC_FIELDS,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown media kind '{}', expected 'anime' or 'manga'", self.0)
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for MediaKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anime" | "episodic" => Ok(MediaKind::Episodic),
            "manga" | "chapterbased" | "chapter_based" => Ok(MediaKind::ChapterBased),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Unit progress is counted in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProgressUnit {
    #[serde(rename = "ep")]
    Episodes,
    #[serde(rename = "ch")]
    Chapters,
}

impl ProgressUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressUnit::Episodes => "ep",
            ProgressUnit::Chapters => "ch",
        }
    }
}

impl fmt::Display for ProgressUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path_segment() {
        assert_eq!("anime".parse::<MediaKind>().unwrap(), MediaKind::Episodic);
        assert_eq!("Manga".parse::<MediaKind>().unwrap(), MediaKind::ChapterBased);
        assert!("novel".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_progress_unit_follows_kind() {
        assert_eq!(MediaKind::Episodic.progress_unit().as_str(), "ep");
        assert_eq!(MediaKind::ChapterBased.progress_unit().as_str(), "ch");
    }

    #[test]
    fn test_manga_sync_refreshes_total() {
        assert!(!MediaKind::Episodic.sync_fields().contains(&UpdatableField::ProgressTotal));
        assert!(MediaKind::ChapterBased.sync_fields().contains(&UpdatableField::ProgressTotal));
    }
}
