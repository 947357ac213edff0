// Error types for the external collaborators

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum BatchError {
    /// Remote catalog or download service did not respond in time
    #[error("network timeout: {0}")]
    NetworkTimeout(String),

    /// Catalog response could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Download service refused the submission
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// Unknown error with details
    #[error("{0}")]
    Unknown(String),
}

// Convert from String for backward compatibility with scraped error text
impl From<String> for BatchError {
    fn from(s: String) -> Self {
        if s.contains("timeout") || s.contains("timed out") {
            return Self::NetworkTimeout(s);
        }

        if s.contains("parse") || s.contains("JSON") {
            return Self::Parse(s);
        }

        if s.contains("reject") || s.contains("denied") || s.contains("duplicate") {
            return Self::Rejected(s);
        }

        Self::Unknown(s)
    }
}
