//! Scan orchestration.
//!
//! Aggregates candidates, fans out per-candidate quote/sentiment fetches
//! with bounded concurrency, scores and reasons each candidate, filters by
//! minimum confidence, and ranks the survivors by confidence descending.
//!
//! A single candidate's failure is logged and skipped, it never aborts
//! the scan. Aggregation-level failures and invalid configuration are hard
//! errors. The pipeline carries no cancellation token; callers wanting a
//! deadline wrap `scan`/`run` in `tokio::time::timeout`, which surfaces as
//! a hard error rather than a silently empty result.

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::providers::{QuoteProvider, SentimentProvider};
use crate::types::StockPick;

use super::candidates::CandidateAggregator;
use super::{reasoning, scoring};

/// Fixed data-source label for the quote feed, appended after the
/// sentiment source names.
const MARKET_DATA_SOURCE: &str = "market_data";

/// Default bound on concurrent per-candidate fetches.
const DEFAULT_FETCH_CONCURRENCY: usize = 8;

// ---------------------------------------------------------------------------
// Caller-facing request/summary
// ---------------------------------------------------------------------------

/// Caller-side scan parameters layered on top of a `ScannerConfig`.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Truncate the ranked result to at most this many picks.
    pub limit: usize,
    /// Overrides the config's `min_confidence_score` when set. Subject to
    /// the same validation.
    pub min_confidence: Option<f64>,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            limit: 10,
            min_confidence: None,
        }
    }
}

/// Outcome of one scan cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// Ranked picks, truncated to the requested limit.
    pub picks: Vec<StockPick>,
    /// Size of the aggregated candidate set.
    pub candidates: usize,
    /// Candidates dropped after per-symbol fetch/score failures.
    pub skipped: usize,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} picks from {} candidates ({} skipped)",
            self.picks.len(),
            self.candidates,
            self.skipped,
        )
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// The scan pipeline with its injected collaborators.
pub struct ScanPipeline {
    aggregator: CandidateAggregator,
    quotes: Arc<dyn QuoteProvider>,
    sentiment: Arc<dyn SentimentProvider>,
    fetch_concurrency: usize,
}

impl ScanPipeline {
    pub fn new(quotes: Arc<dyn QuoteProvider>, sentiment: Arc<dyn SentimentProvider>) -> Self {
        let aggregator = CandidateAggregator::new(Arc::clone(&quotes), Arc::clone(&sentiment));
        Self {
            aggregator,
            quotes,
            sentiment,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }

    /// Bound on concurrent per-candidate fetches (floored at 1).
    pub fn with_fetch_concurrency(mut self, concurrency: usize) -> Self {
        self.fetch_concurrency = concurrency.max(1);
        self
    }

    /// Run a full scan: candidates → score/reason → filter → rank.
    ///
    /// The result is sorted by confidence descending. The sort is stable
    /// and candidates are processed in the aggregation set's alphabetical
    /// order, so equal scores rank alphabetically.
    pub async fn scan(&self, config: &ScannerConfig) -> Result<Vec<StockPick>> {
        let (picks, _, _) = self.scan_detail(config).await?;
        Ok(picks)
    }

    /// Caller-facing entry point: applies the request's min-confidence
    /// override, scans, and truncates the ranked result to the limit.
    pub async fn run(&self, config: &ScannerConfig, request: &ScanRequest) -> Result<ScanSummary> {
        let mut effective = config.clone();
        if let Some(min_confidence) = request.min_confidence {
            effective.min_confidence_score = min_confidence;
        }

        let (mut picks, candidates, skipped) = self.scan_detail(&effective).await?;
        picks.truncate(request.limit);

        Ok(ScanSummary {
            picks,
            candidates,
            skipped,
            timestamp: Utc::now(),
        })
    }

    async fn scan_detail(
        &self,
        config: &ScannerConfig,
    ) -> Result<(Vec<StockPick>, usize, usize)> {
        config.validate()?;

        let candidates = self.aggregator.aggregate().await?;
        let candidate_count = candidates.len();

        let results: Vec<(String, Result<StockPick>)> = stream::iter(candidates)
            .map(|symbol| async move {
                let pick = self.analyze_one(&symbol, config).await;
                (symbol, pick)
            })
            .buffered(self.fetch_concurrency)
            .collect()
            .await;

        let mut picks = Vec::new();
        let mut skipped = 0usize;
        for (symbol, result) in results {
            match result {
                Ok(pick) => {
                    if pick.confidence_score >= config.min_confidence_score {
                        picks.push(pick);
                    } else {
                        debug!(
                            symbol = %symbol,
                            score = pick.confidence_score,
                            "Below confidence threshold"
                        );
                    }
                }
                Err(e) => {
                    skipped += 1;
                    warn!(
                        symbol = %symbol,
                        error = %format!("{e:#}"),
                        "Skipping candidate after fetch failure"
                    );
                }
            }
        }

        // Stable sort: ties keep alphabetical candidate order.
        picks.sort_by(|a, b| {
            b.confidence_score
                .partial_cmp(&a.confidence_score)
                .unwrap_or(Ordering::Equal)
        });

        info!(
            candidates = candidate_count,
            picks = picks.len(),
            skipped,
            "Scan complete"
        );

        Ok((picks, candidate_count, skipped))
    }

    /// Fetch, score, and assemble a pick for one candidate.
    async fn analyze_one(&self, symbol: &str, config: &ScannerConfig) -> Result<StockPick> {
        let (quote, sentiment) = tokio::try_join!(
            self.quotes.quote(symbol),
            self.sentiment.analyze(symbol),
        )?;

        let confidence_score = scoring::confidence_score(&quote, &sentiment, config);
        let reasoning = reasoning::reasons(&quote, &sentiment);

        let mut data_sources = sentiment.source_names();
        data_sources.push(MARKET_DATA_SOURCE.to_string());

        Ok(StockPick {
            symbol: quote.symbol.clone(),
            company_name: quote.display_name().to_string(),
            confidence_score,
            sentiment_score: sentiment.overall_score,
            price: quote.price,
            volume: quote.volume,
            price_change_percent: quote.change_percent,
            reasoning,
            data_sources,
            is_premarket: true,
            pick_date: Utc::now().to_rfc3339(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
