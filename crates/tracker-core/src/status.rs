use tracker_models::{MediaKind, MediaStatus};

/// Translate a remote list status into the local vocabulary.
///
/// CURRENT and PLANNING depend on the kind (watching vs. reading). Anything
/// unrecognized, including an absent status passed as "", falls back to
/// `PlanToWatch` for both kinds.
pub fn map_status(remote_status: &str, kind: MediaKind) -> MediaStatus {
    let episodic = kind == MediaKind::Episodic;
    match remote_status {
        "CURRENT" => {
            if episodic {
                MediaStatus::Watching
            } else {
                MediaStatus::Reading
            }
        }
        "PLANNING" => {
            if episodic {
                MediaStatus::PlanToWatch
            } else {
                MediaStatus::PlanToRead
            }
        }
        "COMPLETED" => MediaStatus::Completed,
        "DROPPED" => MediaStatus::Dropped,
        "PAUSED" => MediaStatus::Paused,
        _ => MediaStatus::PlanToWatch,
    }
}
