// Batch orchestrator module - queue walk, selection, progress

pub mod errors;
pub mod events;
pub mod models;
pub mod processor;
pub mod progress;
pub mod runner;
pub mod scorer;
pub mod traits;
pub mod utils;

pub use errors::BatchError;
pub use events::{BatchBroadcaster, BatchEvent};
pub use models::{
    BatchItem, BatchProgress, Candidate, CandidateFlags, ItemState, ItemStatus, Preferences,
    StatusMap,
};
pub use processor::ItemProcessor;
pub use progress::summarize;
pub use runner::{BatchRunner, RunControl, RunnerConfig};
pub use scorer::{CandidateScorer, ResolutionTier, ScoringConfig, SizeBand};
pub use traits::{CandidateSource, DownloadHandle, DownloadSubmitter};
