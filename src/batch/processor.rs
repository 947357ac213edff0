// Single-item processing: fetch -> select -> submit

use tracing::{info, warn};

use super::models::{BatchItem, ItemStatus, Preferences};
use super::scorer::CandidateScorer;
use super::traits::{CandidateSource, DownloadSubmitter};

/// Status message for an item with no downloadable release
pub const NO_RESOURCE_MESSAGE: &str = "no resource available";

/// Drives one item to a terminal status.
///
/// Stateless: communicates only via its return value, never through shared
/// state, and performs no retries. One failure is terminal for the item in
/// this run.
pub struct ItemProcessor;

impl ItemProcessor {
    pub async fn process(
        item: &BatchItem,
        prefs: &Preferences,
        scorer: &CandidateScorer,
        source: &dyn CandidateSource,
        submitter: &dyn DownloadSubmitter,
    ) -> ItemStatus {
        let candidates = match source.fetch_candidates(item).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("candidate fetch via {} failed for {}: {}", source.name(), item.id, e);
                return ItemStatus::error(e.to_string());
            }
        };

        // Absence of candidates is an expected, non-fatal outcome
        if candidates.is_empty() {
            info!("no candidates for {}", item.id);
            return ItemStatus::skipped(NO_RESOURCE_MESSAGE);
        }

        // Unreachable after the emptiness guard, handled all the same
        let selected = match scorer.select_best(&candidates, prefs) {
            Some(candidate) => candidate,
            None => return ItemStatus::skipped(NO_RESOURCE_MESSAGE),
        };

        info!(
            "selected \"{}\" out of {} candidates for {}",
            selected.title,
            candidates.len(),
            item.id
        );

        match submitter.submit(item, selected).await {
            Ok(handle) => {
                if let Some(task_id) = handle.task_id {
                    info!("{} accepted {} as task {}", submitter.name(), item.id, task_id);
                }
                ItemStatus::success(selected.title.clone())
            }
            Err(e) => {
                warn!("submission via {} failed for {}: {}", submitter.name(), item.id, e);
                ItemStatus::error(e.to_string())
            }
        }
    }
}
