// Run-level progress aggregation

use super::models::{BatchProgress, ItemState, StatusMap};

/// Derive the run counters from the status map.
///
/// Stateless: always recomputed fresh, so the counters cannot drift out of
/// sync with the per-item statuses.
pub fn summarize(statuses: &StatusMap) -> BatchProgress {
    let mut progress = BatchProgress {
        total: statuses.len(),
        ..Default::default()
    };

    for status in statuses.values() {
        match status.state {
            ItemState::Pending => progress.pending += 1,
            ItemState::Loading => progress.active += 1,
            ItemState::Success => progress.success += 1,
            ItemState::Error => progress.error += 1,
            ItemState::Skipped => progress.skipped += 1,
        }
    }

    progress.completed = progress.success + progress.error + progress.skipped;
    progress.percent = if progress.total == 0 {
        0
    } else {
        (100.0 * progress.completed as f64 / progress.total as f64).round() as u8
    };

    progress
}
