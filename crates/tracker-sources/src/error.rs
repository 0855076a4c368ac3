use thiserror::Error;

/// A failed call to a remote cataloging source.
///
/// Any of these aborts the whole fetch; no partial list is returned.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl SourceError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status reported by the remote, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Http(e) => e.status().map(|s| s.as_u16()),
            SourceError::Api { status, .. } => Some(*status),
            SourceError::InvalidResponse(_) => None,
        }
    }
}
