//! Candidate-symbol aggregation.
//!
//! Unions the symbols surfaced by premarket movers (gainers, losers,
//! volume spikes) with the trending symbols from sentiment into a single
//! deduplicated candidate set. No filtering happens here; filtering is
//! solely confidence-based and applied downstream.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::providers::{QuoteProvider, SentimentProvider};

/// How many trending symbols to pull from the sentiment provider.
pub const DEFAULT_TRENDING_LIMIT: usize = 10;

/// Builds the candidate set for one scan.
pub struct CandidateAggregator {
    quotes: Arc<dyn QuoteProvider>,
    sentiment: Arc<dyn SentimentProvider>,
    trending_limit: usize,
}

impl CandidateAggregator {
    pub fn new(quotes: Arc<dyn QuoteProvider>, sentiment: Arc<dyn SentimentProvider>) -> Self {
        Self {
            quotes,
            sentiment,
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }

    pub fn with_trending_limit(mut self, limit: usize) -> Self {
        self.trending_limit = limit;
        self
    }

    /// Union mover symbols and trending symbols into a deduplicated set.
    ///
    /// Iteration order is an implementation detail (alphabetical via
    /// `BTreeSet`); the pipeline imposes its own ranking downstream.
    /// If either provider call fails the whole aggregation fails; no
    /// partial candidate sets, no retries.
    pub async fn aggregate(&self) -> Result<BTreeSet<String>> {
        let (movers, trending) = tokio::join!(
            self.quotes.movers(),
            self.sentiment.trending_symbols(self.trending_limit),
        );
        let movers = movers.context("Failed to fetch premarket movers")?;
        let trending = trending.context("Failed to fetch trending symbols")?;

        debug!(
            gainers = movers.top_gainers.len(),
            losers = movers.top_losers.len(),
            volume_spikes = movers.volume_spikes.len(),
            trending = trending.len(),
            "Candidate sources fetched"
        );

        let mut candidates: BTreeSet<String> =
            movers.all().map(|q| q.symbol.clone()).collect();
        candidates.extend(trending);

        info!(candidates = candidates.len(), "Candidate set aggregated");
        Ok(candidates)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
