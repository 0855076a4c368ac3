//! Field extraction from remote list entries.
//!
//! Every nested field of a remote entry may be missing. These functions never
//! fail: they fall back to documented defaults and log a warning instead.

use tracing::warn;
use tracker_models::{MediaKind, MediaRecord, UNKNOWN_TITLE};
use tracker_sources::{RemoteEntry, RemoteMedia};

use crate::status::map_status;

/// English title if present and non-empty, else Romaji, else None
pub fn media_title(media: &RemoteMedia) -> Option<String> {
    let title = media.title.as_ref()?;
    let non_empty = |t: &Option<String>| t.as_ref().filter(|s| !s.trim().is_empty()).cloned();
    non_empty(&title.english).or_else(|| non_empty(&title.romaji))
}

/// Display title for a list entry, `"Unknown Title"` when none is available
pub fn extract_title(entry: &RemoteEntry) -> String {
    match entry.media.as_ref().and_then(media_title) {
        Some(title) => title,
        None => {
            warn!(
                media_id = entry.media_id,
                entry_id = entry.id,
                "No title found, using '{}'",
                UNKNOWN_TITLE
            );
            UNKNOWN_TITLE.to_string()
        }
    }
}

/// Display title for a search hit
pub fn extract_search_title(media: &RemoteMedia) -> String {
    media_title(media).unwrap_or_else(|| {
        warn!(media_id = media.id, "No title found for search result, using '{}'", UNKNOWN_TITLE);
        UNKNOWN_TITLE.to_string()
    })
}

pub fn extract_progress_current(entry: &RemoteEntry) -> u32 {
    entry.progress.unwrap_or(0)
}

/// Total units for an entry.
///
/// Anime without an episode count (not yet released) get 0. Manga without a
/// chapter count is usually ongoing, so the total tracks the reader's progress.
pub fn extract_progress_total(entry: &RemoteEntry, kind: MediaKind) -> u32 {
    let media = entry.media.as_ref();
    match kind {
        MediaKind::Episodic => match media.and_then(|m| m.episodes) {
            Some(episodes) => episodes,
            None => {
                warn!(media_id = entry.media_id, "No episode count found, using 0 as progress total");
                0
            }
        },
        MediaKind::ChapterBased => match media.and_then(|m| m.chapters) {
            Some(chapters) => chapters,
            None => {
                let current = extract_progress_current(entry);
                warn!(
                    media_id = entry.media_id,
                    progress = current,
                    "No chapter count found (ongoing series?), using chapters read as progress total"
                );
                current
            }
        },
    }
}

/// Build the local record for one remote entry
pub fn build_record(entry: &RemoteEntry, kind: MediaKind) -> MediaRecord {
    MediaRecord::new(
        kind,
        entry.media_id,
        extract_title(entry),
        map_status(entry.status.as_deref().unwrap_or_default(), kind),
        extract_progress_current(entry),
        extract_progress_total(entry, kind),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_models::{MediaStatus, ProgressUnit};
    use tracker_sources::RemoteTitle;

    fn entry(media: Option<RemoteMedia>, status: Option<&str>, progress: Option<u32>) -> RemoteEntry {
        RemoteEntry {
            id: 900,
            media_id: 42,
            status: status.map(str::to_string),
            progress,
            media,
        }
    }

    fn media(english: Option<&str>, romaji: Option<&str>) -> RemoteMedia {
        RemoteMedia {
            id: 42,
            title: Some(RemoteTitle {
                english: english.map(str::to_string),
                romaji: romaji.map(str::to_string),
            }),
            episodes: None,
            chapters: None,
        }
    }

    #[test]
    fn test_title_prefers_english() {
        let e = entry(Some(media(Some("Attack on Titan"), Some("Shingeki no Kyojin"))), None, None);
        assert_eq!(extract_title(&e), "Attack on Titan");
    }

    #[test]
    fn test_title_falls_back_to_romaji() {
        let e = entry(Some(media(None, Some("Shingeki no Kyojin"))), None, None);
        assert_eq!(extract_title(&e), "Shingeki no Kyojin");

        let blank_english = entry(Some(media(Some(""), Some("Shingeki no Kyojin"))), None, None);
        assert_eq!(extract_title(&blank_english), "Shingeki no Kyojin");
    }

    #[test]
    fn test_title_unknown_for_every_absence() {
        let no_variants = entry(Some(media(None, None)), None, None);
        let empty_variants = entry(Some(media(Some(" "), Some(""))), None, None);
        let no_title = entry(
            Some(RemoteMedia { id: 42, title: None, episodes: None, chapters: None }),
            None,
            None,
        );
        let no_media = entry(None, None, None);

        for e in [no_variants, empty_variants, no_title, no_media] {
            assert_eq!(extract_title(&e), UNKNOWN_TITLE);
        }
    }

    #[test]
    fn test_episodic_total() {
        let mut m = media(Some("Frieren"), None);
        m.episodes = Some(28);
        assert_eq!(extract_progress_total(&entry(Some(m), None, Some(3)), MediaKind::Episodic), 28);

        let unreleased = entry(Some(media(Some("Frieren"), None)), None, Some(3));
        assert_eq!(extract_progress_total(&unreleased, MediaKind::Episodic), 0);
        assert_eq!(extract_progress_total(&entry(None, None, Some(3)), MediaKind::Episodic), 0);
    }

    #[test]
    fn test_chapter_total_falls_back_to_progress() {
        let mut m = media(Some("Berserk"), None);
        m.chapters = Some(380);
        assert_eq!(extract_progress_total(&entry(Some(m), None, Some(100)), MediaKind::ChapterBased), 380);

        let ongoing = entry(Some(media(Some("One Piece"), None)), None, Some(1100));
        assert_eq!(extract_progress_total(&ongoing, MediaKind::ChapterBased), 1100);

        // Missing progress counts as 0 on both sides
        assert_eq!(extract_progress_total(&entry(None, None, None), MediaKind::ChapterBased), 0);
    }

    #[test]
    fn test_episodic_total_ignores_chapters() {
        let mut m = media(Some("Odd"), None);
        m.chapters = Some(50);
        assert_eq!(extract_progress_total(&entry(Some(m), None, Some(2)), MediaKind::Episodic), 0);
    }

    #[test]
    fn test_build_record_for_current_anime() {
        let mut m = media(Some("Frieren"), Some("Sousou no Frieren"));
        m.episodes = Some(12);
        let record = build_record(&entry(Some(m), Some("CURRENT"), Some(5)), MediaKind::Episodic);

        assert_eq!(record.external_id, 42);
        assert_eq!(record.title, "Frieren");
        assert_eq!(record.status, MediaStatus::Watching);
        assert_eq!(record.progress_current, 5);
        assert_eq!(record.progress_total, 12);
        assert_eq!(record.progress_unit, ProgressUnit::Episodes);
    }

    #[test]
    fn test_build_record_with_nothing_but_ids() {
        let record = build_record(&entry(None, None, None), MediaKind::ChapterBased);

        assert_eq!(record.title, UNKNOWN_TITLE);
        assert_eq!(record.status, MediaStatus::PlanToWatch);
        assert_eq!(record.progress_current, 0);
        assert_eq!(record.progress_total, 0);
        assert_eq!(record.progress_unit, ProgressUnit::Chapters);
    }

    #[test]
    fn test_search_title() {
        assert_eq!(extract_search_title(&media(None, Some("Berserk"))), "Berserk");
        let bare = RemoteMedia { id: 1, title: None, episodes: None, chapters: None };
        assert_eq!(extract_search_title(&bare), UNKNOWN_TITLE);
    }
}
