//! Core scanning pipeline.
//!
//! Candidate aggregation → per-symbol confidence scoring and reasoning →
//! threshold filter → descending-confidence ranking.

pub mod candidates;
pub mod pipeline;
pub mod reasoning;
pub mod scoring;

pub use candidates::CandidateAggregator;
pub use pipeline::{ScanPipeline, ScanRequest, ScanSummary};
pub use reasoning::reasons;
pub use scoring::confidence_score;
