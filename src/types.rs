//! Shared types for the SCOUT scanner.
//!
//! These types form the data model used across all modules. Everything here
//! is a transient snapshot: constructed fresh per scan, never persisted,
//! never mutated after assembly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

/// A price/volume snapshot for one symbol, as returned by a `QuoteProvider`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    /// Absolute change since previous close.
    pub change: f64,
    /// Change since previous close as a percentage (e.g. 4.5 = +4.5%).
    pub change_percent: f64,
    pub volume: u64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub company_name: Option<String>,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ${:.2} {:+.2} ({:+.2}%) vol={}",
            self.symbol, self.price, self.change, self.change_percent, self.volume,
        )
    }
}

impl Quote {
    /// Company name if known, otherwise the ticker symbol.
    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.symbol)
    }

    /// Helper to build a test quote with sensible defaults.
    #[cfg(test)]
    pub fn sample(symbol: &str) -> Self {
        Quote {
            symbol: symbol.to_string(),
            price: 182.50,
            change: 2.10,
            change_percent: 1.16,
            volume: 3_200_000,
            market_cap: Some(2.8e12),
            company_name: Some(format!("{symbol} Inc.")),
        }
    }
}

/// Premarket mover lists: the three quote sequences a scan seeds from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoverSnapshot {
    pub top_gainers: Vec<Quote>,
    pub top_losers: Vec<Quote>,
    pub volume_spikes: Vec<Quote>,
    pub timestamp: DateTime<Utc>,
}

impl MoverSnapshot {
    /// All quotes across the three lists, in list order.
    pub fn all(&self) -> impl Iterator<Item = &Quote> {
        self.top_gainers
            .iter()
            .chain(self.top_losers.iter())
            .chain(self.volume_spikes.iter())
    }

    /// Total number of quotes across the three lists (symbols may repeat).
    pub fn len(&self) -> usize {
        self.top_gainers.len() + self.top_losers.len() + self.volume_spikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Per-source sentiment reading for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSource {
    /// Source identifier: "twitter" | "reddit" | "news"
    pub name: String,
    /// Sentiment score in [-1.0, 1.0].
    pub score: f64,
    pub mentions: u64,
    /// Extracted keywords in extraction order. May repeat across sources.
    pub keywords: Vec<String>,
}

/// Aggregated sentiment for one symbol across all sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub symbol: String,
    /// Weighted combination of per-source scores, in [-1.0, 1.0].
    pub overall_score: f64,
    /// Non-empty, in source order.
    pub sources: Vec<SentimentSource>,
    /// True iff any single source exceeds the mention threshold.
    pub trending: bool,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for SentimentAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] sentiment={:+.2} sources={} mentions={}{}",
            self.symbol,
            self.overall_score,
            self.sources.len(),
            self.total_mentions(),
            if self.trending { " TRENDING" } else { "" },
        )
    }
}

impl SentimentAnalysis {
    /// Source names in their given order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }

    /// Sum of mention counts across all sources.
    pub fn total_mentions(&self) -> u64 {
        self.sources.iter().map(|s| s.mentions).sum()
    }

    /// Helper to build a test analysis with the standard three sources.
    #[cfg(test)]
    pub fn sample(symbol: &str, overall_score: f64, trending: bool) -> Self {
        SentimentAnalysis {
            symbol: symbol.to_string(),
            overall_score,
            sources: vec![
                SentimentSource {
                    name: "twitter".to_string(),
                    score: overall_score,
                    mentions: if trending { 800 } else { 120 },
                    keywords: vec!["earnings".to_string(), "breakout".to_string()],
                },
                SentimentSource {
                    name: "reddit".to_string(),
                    score: overall_score,
                    mentions: 60,
                    keywords: vec!["earnings".to_string(), "buy".to_string()],
                },
                SentimentSource {
                    name: "news".to_string(),
                    score: overall_score,
                    mentions: 25,
                    keywords: vec!["guidance".to_string()],
                },
            ],
            trending,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pick
// ---------------------------------------------------------------------------

/// A scored, reasoned, ranked output record for one symbol.
///
/// Assembled once per scan per candidate; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPick {
    pub symbol: String,
    pub company_name: String,
    /// Normalized confidence in [0.0, 1.0].
    pub confidence_score: f64,
    /// Copied from `SentimentAnalysis::overall_score`, in [-1.0, 1.0].
    pub sentiment_score: f64,
    pub price: f64,
    pub volume: u64,
    pub price_change_percent: f64,
    /// Human-readable justifications, in fixed rule order. May be empty.
    pub reasoning: Vec<String>,
    /// Sentiment source names in order, then the literal "market_data".
    pub data_sources: Vec<String>,
    pub is_premarket: bool,
    /// RFC 3339 timestamp of the scan that produced this pick.
    pub pick_date: String,
}

impl fmt::Display for StockPick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} conf={:.0}% sent={:+.2} ${:.2} ({:+.2}%) vol={} [{}]",
            self.symbol,
            self.confidence_score * 100.0,
            self.sentiment_score,
            self.price,
            self.price_change_percent,
            self.volume,
            self.reasoning.join("; "),
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for SCOUT.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("Provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("Invalid scanner configuration: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
