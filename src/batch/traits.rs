// Collaborator trait definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::BatchError;
use super::models::{BatchItem, Candidate};

/// Acknowledgement returned by the download service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadHandle {
    /// Task identifier assigned by the service, when it reports one
    pub task_id: Option<String>,
}

/// Trait for the remote catalog that lists release candidates.
///
/// `fetch_candidates` must resolve (possibly to an empty list) or fail; the
/// orchestrator imposes no internal timeout, so a collaborator that hangs
/// stalls that item's slot.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Name of the source (for logging)
    fn name(&self) -> &'static str;

    /// List the downloadable releases for one item
    async fn fetch_candidates(&self, item: &BatchItem) -> Result<Vec<Candidate>, BatchError>;
}

/// Trait for the download service that accepts a selected release.
///
/// Idempotency of repeated submissions is the collaborator's responsibility.
#[async_trait]
pub trait DownloadSubmitter: Send + Sync {
    /// Name of the submitter (for logging)
    fn name(&self) -> &'static str;

    /// Push one selected candidate to the download service
    async fn submit(
        &self,
        item: &BatchItem,
        candidate: &Candidate,
    ) -> Result<DownloadHandle, BatchError>;
}
