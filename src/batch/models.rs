// Common data models for the batch orchestrator

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::utils::parse_size;

/// Title markers that indicate a high-definition release
pub const HD_MARKERS: &[&str] = &["2160", "4k", "uhd", "1080", "fhd", "720"];

/// Title markers that indicate a localized-subtitle release
pub const SUBTITLE_MARKERS: &[&str] = &["中文", "中字", "字幕", "chs", "cht"];

/// Title markers that indicate an uncut release
pub const UNCUT_MARKERS: &[&str] = &["無修正", "无码", "uncensored", "uncut"];

/// One media unit selected for the batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    /// Stable identifier (catalog code)
    pub id: String,
    /// Human label shown in the run view
    pub label: String,
    /// Source locator used to fetch release candidates
    pub url: String,
    /// Full title, when the catalog provided one
    pub title: Option<String>,
    /// Cover image URL for display
    pub cover: Option<String>,
}

impl BatchItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: url.into(),
            title: None,
            cover: None,
        }
    }
}

/// Named boolean quality attributes of a release candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFlags {
    /// High-definition release
    pub high_def: bool,
    /// Carries localized subtitles
    pub localized_subs: bool,
    /// Uncut / uncensored release
    pub uncut: bool,
}

/// One downloadable release for an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Release title as listed by the catalog
    pub title: String,
    /// Raw size label (e.g., "4.2GB"), parsed on demand
    pub size: Option<String>,
    /// Quality attributes
    pub flags: CandidateFlags,
}

impl Candidate {
    pub fn new(title: impl Into<String>, size: Option<String>, flags: CandidateFlags) -> Self {
        Self {
            title: title.into(),
            size,
            flags,
        }
    }

    /// Build a candidate from a scraped listing, deriving the quality flags
    /// from marker substrings in the title
    pub fn from_label(title: impl Into<String>, size: Option<String>) -> Self {
        let title = title.into();
        let lower = title.to_lowercase();

        let flags = CandidateFlags {
            high_def: HD_MARKERS.iter().any(|m| lower.contains(m)),
            localized_subs: SUBTITLE_MARKERS.iter().any(|m| lower.contains(m)),
            uncut: UNCUT_MARKERS.iter().any(|m| lower.contains(m)),
        };

        Self { title, size, flags }
    }

    /// Size in bytes, when the label is parseable
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(parse_size)
    }
}

/// Run-scoped selection preferences, read-only during the run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Preferences {
    /// When false, the first returned candidate is used unconditionally
    pub auto_select_best: bool,
    /// Weight high-definition releases
    pub prefer_high_def: bool,
    /// Weight localized-subtitle releases
    pub prefer_localized_subs: bool,
    /// Weight uncut releases
    pub prefer_uncut: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_select_best: true,
            prefer_high_def: true,
            prefer_localized_subs: true,
            prefer_uncut: false,
        }
    }
}

/// Per-item processing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    /// Not yet reached by the queue walk
    Pending,
    /// Currently being processed
    Loading,
    /// Submitted to the download service
    Success,
    /// Fetch or submission failed
    Error,
    /// No candidate was available
    Skipped,
}

impl ItemState {
    /// Terminal states are never left within a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error | Self::Skipped)
    }
}

/// Per-item state plus an optional human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatus {
    pub state: ItemState,
    /// Selected candidate title, or failure detail
    pub message: Option<String>,
}

impl ItemStatus {
    pub fn pending() -> Self {
        Self {
            state: ItemState::Pending,
            message: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            state: ItemState::Loading,
            message: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            state: ItemState::Success,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            state: ItemState::Error,
            message: Some(message.into()),
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            state: ItemState::Skipped,
            message: Some(message.into()),
        }
    }
}

/// Shared status map keyed by item id
pub type StatusMap = HashMap<String, ItemStatus>;

/// Run-level counters derived from the status map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub pending: usize,
    pub active: usize,
    pub success: usize,
    pub error: usize,
    pub skipped: usize,
    /// success + error + skipped
    pub completed: usize,
    pub total: usize,
    /// Rounded percentage of completed items, 0 for an empty run
    pub percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_from_label() {
        let c = Candidate::from_label("B-1080p-中文", Some("4GB".to_string()));
        assert!(c.flags.high_def);
        assert!(c.flags.localized_subs);
        assert!(!c.flags.uncut);

        let c = Candidate::from_label("Plain-Release", None);
        assert_eq!(c.flags, CandidateFlags::default());

        let c = Candidate::from_label("X-4K-Uncensored", Some("12GB".to_string()));
        assert!(c.flags.high_def);
        assert!(c.flags.uncut);
    }

    #[test]
    fn test_size_bytes() {
        let c = Candidate::from_label("A-720p", Some("1.5GB".to_string()));
        assert_eq!(c.size_bytes(), Some((1.5 * 1024.0 * 1024.0 * 1024.0) as u64));

        let c = Candidate::from_label("A-720p", Some("???".to_string()));
        assert_eq!(c.size_bytes(), None);

        let c = Candidate::from_label("A-720p", None);
        assert_eq!(c.size_bytes(), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ItemState::Pending.is_terminal());
        assert!(!ItemState::Loading.is_terminal());
        assert!(ItemState::Success.is_terminal());
        assert!(ItemState::Error.is_terminal());
        assert!(ItemState::Skipped.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        let status = ItemStatus::success("B-1080p-中文");
        let json = serde_json::to_string(&status).expect("serialize");
        assert!(json.contains("\"success\""));
        assert!(json.contains("B-1080p-中文"));
    }
}
