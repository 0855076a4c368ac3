use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Local status vocabulary shared by both media kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaStatus {
    #[serde(rename = "Plan to Watch")]
    PlanToWatch,
    #[serde(rename = "Watching")]
    Watching,
    #[serde(rename = "Plan to Read")]
    PlanToRead,
    #[serde(rename = "Reading")]
    Reading,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Dropped")]
    Dropped,
    #[serde(rename = "Paused")]
    Paused,
}

impl MediaStatus {
    /// Display string, also the value persisted in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaStatus::PlanToWatch => "Plan to Watch",
            MediaStatus::Watching => "Watching",
            MediaStatus::PlanToRead => "Plan to Read",
            MediaStatus::Reading => "Reading",
            MediaStatus::Completed => "Completed",
            MediaStatus::Dropped => "Dropped",
            MediaStatus::Paused => "Paused",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown media status '{}'", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for MediaStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Plan to Watch" => Ok(MediaStatus::PlanToWatch),
            "Watching" => Ok(MediaStatus::Watching),
            "Plan to Read" => Ok(MediaStatus::PlanToRead),
            "Reading" => Ok(MediaStatus::Reading),
            "Completed" => Ok(MediaStatus::Completed),
            "Dropped" => Ok(MediaStatus::Dropped),
            "Paused" => Ok(MediaStatus::Paused),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
