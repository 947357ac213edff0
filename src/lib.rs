pub mod batch;

pub use batch::{
    BatchError, BatchItem, BatchProgress, BatchRunner, Candidate, CandidateFlags, CandidateScorer,
    CandidateSource, DownloadHandle, DownloadSubmitter, ItemState, ItemStatus, Preferences,
    RunnerConfig, ScoringConfig,
};
