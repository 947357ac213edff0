// Batch runner - owns the queue walk and the run controls
//
// Single logical flow of control: one spawned task walks the queue in order
// and is the sole writer of the status map. Pause/resume/abort only flip
// flags on a watch channel; the loop observes them at item boundaries, so an
// in-flight item is never interrupted (its result is still recorded even if
// abort was requested while it ran).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time::sleep;
use tracing::{info, warn};

use super::events::{BatchBroadcaster, BatchEvent};
use super::models::{BatchItem, BatchProgress, ItemStatus, Preferences, StatusMap};
use super::processor::ItemProcessor;
use super::progress::summarize;
use super::scorer::{CandidateScorer, ScoringConfig};
use super::traits::{CandidateSource, DownloadSubmitter};

/// Run-level control flags, carried on a watch channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunControl {
    pub paused: bool,
    pub aborted: bool,
}

/// Runner tuning knobs
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Breather between items so the remote services are not hammered
    pub inter_item_delay: Duration,
    /// Event channel buffer size
    pub event_capacity: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            inter_item_delay: Duration::from_millis(300),
            event_capacity: 64,
        }
    }
}

impl RunnerConfig {
    pub fn with_inter_item_delay(mut self, delay: Duration) -> Self {
        self.inter_item_delay = delay;
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}

#[derive(Default)]
struct RunState {
    items: Vec<BatchItem>,
    statuses: StatusMap,
    cursor: usize,
    active: bool,
}

/// Orchestrates one batch run at a time over the injected collaborators.
///
/// Cheap to clone; all clones share the same run.
#[derive(Clone)]
pub struct BatchRunner {
    source: Arc<dyn CandidateSource>,
    submitter: Arc<dyn DownloadSubmitter>,
    scorer: CandidateScorer,
    config: RunnerConfig,
    control: Arc<watch::Sender<RunControl>>,
    events: BatchBroadcaster,
    state: Arc<Mutex<RunState>>,
}

impl BatchRunner {
    pub fn new(source: Arc<dyn CandidateSource>, submitter: Arc<dyn DownloadSubmitter>) -> Self {
        Self::with_config(
            source,
            submitter,
            RunnerConfig::default(),
            ScoringConfig::default(),
        )
    }

    pub fn with_config(
        source: Arc<dyn CandidateSource>,
        submitter: Arc<dyn DownloadSubmitter>,
        config: RunnerConfig,
        scoring: ScoringConfig,
    ) -> Self {
        let (control, _) = watch::channel(RunControl::default());
        Self {
            source,
            submitter,
            scorer: CandidateScorer::with_config(scoring),
            events: BatchBroadcaster::new(config.event_capacity),
            config,
            control: Arc::new(control),
            state: Arc::new(Mutex::new(RunState::default())),
        }
    }

    /// Begin a run over the finalized item list. Item ids must be unique.
    /// The run loop is spawned onto the ambient tokio runtime.
    ///
    /// Returns false (and does nothing) when a run is already active. The
    /// control flags are reset on every start, so pause/abort calls made
    /// before this point do not carry over.
    pub fn start(&self, items: Vec<BatchItem>, prefs: Preferences) -> bool {
        let total = items.len();
        {
            let mut state = self.state_guard();
            if state.active {
                warn!("batch run already active, ignoring start");
                return false;
            }
            state.statuses = items
                .iter()
                .map(|item| (item.id.clone(), ItemStatus::pending()))
                .collect();
            state.items = items;
            state.cursor = 0;
            state.active = true;
        }
        self.control.send_replace(RunControl::default());

        info!("batch run started with {} items", total);
        self.publish_update();

        let runner = self.clone();
        tokio::spawn(async move { runner.run_loop(prefs).await });
        true
    }

    /// Hold the queue walk before the next item. Idempotent, safe anytime.
    pub fn pause(&self) {
        self.control.send_modify(|control| control.paused = true);
    }

    /// Release a paused queue walk. Idempotent, safe anytime.
    pub fn resume(&self) {
        self.control.send_modify(|control| control.paused = false);
    }

    /// Stop the run at the next item boundary, leaving unreached items
    /// pending. The item in flight still completes and is recorded.
    pub fn abort(&self) {
        self.control.send_modify(|control| control.aborted = true);
    }

    /// Receive an event on every status change. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<BatchEvent> {
        self.events.subscribe()
    }

    /// Current status map plus aggregate counters
    pub fn snapshot(&self) -> (StatusMap, BatchProgress) {
        let state = self.state_guard();
        let statuses = state.statuses.clone();
        let progress = summarize(&statuses);
        (statuses, progress)
    }

    pub fn progress(&self) -> BatchProgress {
        summarize(&self.state_guard().statuses)
    }

    pub fn is_active(&self) -> bool {
        self.state_guard().active
    }

    /// Index of the item currently (or last) being processed
    pub fn cursor(&self) -> usize {
        self.state_guard().cursor
    }

    async fn run_loop(&self, prefs: Preferences) {
        let mut control = self.control.subscribe();
        let total = self.state_guard().items.len();

        for index in 0..total {
            if control.borrow().aborted {
                break;
            }

            // Pause gate: suspend on flag changes instead of interval polling
            loop {
                let flags = *control.borrow();
                if flags.aborted || !flags.paused {
                    break;
                }
                if control.changed().await.is_err() {
                    return;
                }
            }
            if control.borrow().aborted {
                break;
            }

            let item = self.state_guard().items[index].clone();
            self.set_status(index, &item.id, ItemStatus::loading());

            let status = ItemProcessor::process(
                &item,
                &prefs,
                &self.scorer,
                self.source.as_ref(),
                self.submitter.as_ref(),
            )
            .await;
            self.set_status(index, &item.id, status);

            if index + 1 < total {
                sleep(self.config.inter_item_delay).await;
            }
        }

        let aborted = control.borrow().aborted;
        let progress = {
            let mut state = self.state_guard();
            state.active = false;
            summarize(&state.statuses)
        };

        if aborted {
            // Deliberate user action: the live per-item statuses tell the
            // story, no summary is emitted
            info!(
                "batch run aborted after {} of {} items",
                progress.completed, progress.total
            );
        } else {
            info!(
                "batch run finished: {} succeeded, {} failed",
                progress.success, progress.error
            );
            self.events.broadcast_lossy(BatchEvent::Finished {
                success: progress.success,
                error: progress.error,
            });
        }
    }

    fn set_status(&self, index: usize, id: &str, status: ItemStatus) {
        {
            let mut state = self.state_guard();
            state.cursor = index;
            state.statuses.insert(id.to_string(), status);
        }
        self.publish_update();
    }

    fn publish_update(&self) {
        let (statuses, progress) = self.snapshot();
        self.events
            .broadcast_lossy(BatchEvent::Updated { statuses, progress });
    }

    fn state_guard(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
