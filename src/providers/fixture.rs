//! Deterministic fixture providers.
//!
//! In-memory `QuoteProvider`/`SentimentProvider` implementations with a
//! known dataset and controllable failures. Used by integration tests and
//! by the binary's dry-run mode in place of real market/sentiment feeds.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::sentiment::{is_trending, SourceWeights};
use crate::types::{MoverSnapshot, Quote, ScoutError, SentimentAnalysis, SentimentSource};

use super::{QuoteProvider, SentimentProvider};

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// A deterministic in-memory quote provider.
pub struct FixtureQuotes {
    quotes: HashMap<String, Quote>,
    movers: MoverSnapshot,
    /// If set, all operations return this error.
    force_error: Arc<Mutex<Option<String>>>,
}

impl FixtureQuotes {
    /// Fixture with the default quote universe.
    pub fn new() -> Self {
        let (quotes, movers) = default_quote_universe();
        Self::with_data(quotes, movers)
    }

    /// Fixture with custom quotes and movers. Quotes are keyed by symbol.
    pub fn with_data(quotes: Vec<Quote>, movers: MoverSnapshot) -> Self {
        Self {
            quotes: quotes.into_iter().map(|q| (q.symbol.clone(), q)).collect(),
            movers,
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Add or replace a quote.
    pub fn insert(&mut self, quote: Quote) {
        self.quotes.insert(quote.symbol.clone(), quote);
    }

    /// Force all subsequent operations to return an error.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Clear any forced error.
    pub fn clear_error(&self) {
        *self.force_error.lock().unwrap() = None;
    }

    fn check_error(&self) -> Result<()> {
        if let Some(msg) = self.force_error.lock().unwrap().clone() {
            return Err(ScoutError::Provider {
                provider: "fixture-quotes".to_string(),
                message: msg,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for FixtureQuotes {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for FixtureQuotes {
    async fn quote(&self, symbol: &str) -> Result<Quote> {
        self.check_error()?;
        self.quotes.get(symbol).cloned().ok_or_else(|| {
            ScoutError::Provider {
                provider: "fixture-quotes".to_string(),
                message: format!("no fixture quote for {symbol}"),
            }
            .into()
        })
    }

    async fn movers(&self) -> Result<MoverSnapshot> {
        self.check_error()?;
        Ok(self.movers.clone())
    }

    fn name(&self) -> &str {
        "fixture-quotes"
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// A deterministic in-memory sentiment provider.
pub struct FixtureSentiment {
    analyses: HashMap<String, SentimentAnalysis>,
    trending: Vec<String>,
    force_error: Arc<Mutex<Option<String>>>,
}

impl FixtureSentiment {
    /// Fixture with the default sentiment dataset.
    pub fn new() -> Self {
        let weights = SourceWeights::default();
        let analyses = default_sentiment_universe(&weights);
        let trending = vec!["NVDA".to_string(), "AMD".to_string()];
        Self::with_data(analyses, trending)
    }

    /// Fixture with custom analyses (keyed by symbol) and trending list.
    pub fn with_data(analyses: Vec<SentimentAnalysis>, trending: Vec<String>) -> Self {
        Self {
            analyses: analyses
                .into_iter()
                .map(|a| (a.symbol.clone(), a))
                .collect(),
            trending,
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Add or replace an analysis.
    pub fn insert(&mut self, analysis: SentimentAnalysis) {
        self.analyses.insert(analysis.symbol.clone(), analysis);
    }

    /// Force all subsequent operations to return an error.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Clear any forced error.
    pub fn clear_error(&self) {
        *self.force_error.lock().unwrap() = None;
    }

    fn check_error(&self) -> Result<()> {
        if let Some(msg) = self.force_error.lock().unwrap().clone() {
            return Err(ScoutError::Provider {
                provider: "fixture-sentiment".to_string(),
                message: msg,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for FixtureSentiment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentProvider for FixtureSentiment {
    async fn analyze(&self, symbol: &str) -> Result<SentimentAnalysis> {
        self.check_error()?;
        self.analyses.get(symbol).cloned().ok_or_else(|| {
            ScoutError::Provider {
                provider: "fixture-sentiment".to_string(),
                message: format!("no fixture sentiment for {symbol}"),
            }
            .into()
        })
    }

    async fn trending_symbols(&self, limit: usize) -> Result<Vec<String>> {
        self.check_error()?;
        Ok(self.trending.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &str {
        "fixture-sentiment"
    }
}

// ---------------------------------------------------------------------------
// Default datasets
// ---------------------------------------------------------------------------

/// Build a quote with the change amount derived from price and percentage.
pub fn make_quote(symbol: &str, price: f64, change_percent: f64, volume: u64) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        price,
        change: price * change_percent / 100.0,
        change_percent,
        volume,
        market_cap: None,
        company_name: Some(format!("{symbol} Inc.")),
    }
}

/// Build a three-source analysis, deriving overall score and trending flag
/// through the same aggregation rules production providers would use.
pub fn make_analysis(
    symbol: &str,
    weights: &SourceWeights,
    scores: [f64; 3],
    mentions: [u64; 3],
    keywords: &[&str],
) -> SentimentAnalysis {
    let names = ["twitter", "reddit", "news"];
    let sources: Vec<SentimentSource> = names
        .iter()
        .zip(scores)
        .zip(mentions)
        .map(|((name, score), mentions)| SentimentSource {
            name: name.to_string(),
            score,
            mentions,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect();

    SentimentAnalysis {
        symbol: symbol.to_string(),
        overall_score: weights.combine(&sources),
        trending: is_trending(&sources),
        sources,
        timestamp: Utc::now(),
    }
}

/// Known quote universe: movers plus a few trending-only symbols.
fn default_quote_universe() -> (Vec<Quote>, MoverSnapshot) {
    let gainers = vec![
        make_quote("NVDA", 470.00, 12.40, 9_500_000),
        make_quote("SOUN", 5.80, 18.20, 2_400_000),
    ];
    let losers = vec![make_quote("TSLA", 212.30, -7.50, 6_100_000)];
    let spikes = vec![make_quote("AAPL", 182.50, 1.10, 12_000_000)];

    let mut quotes: Vec<Quote> = gainers
        .iter()
        .chain(losers.iter())
        .chain(spikes.iter())
        .cloned()
        .collect();
    // Symbols surfaced only by trending sentiment.
    quotes.push(make_quote("AMD", 118.40, 3.20, 4_000_000));

    let movers = MoverSnapshot {
        top_gainers: gainers,
        top_losers: losers,
        volume_spikes: spikes,
        timestamp: Utc::now(),
    };

    (quotes, movers)
}

/// Known sentiment dataset covering the default quote universe.
fn default_sentiment_universe(weights: &SourceWeights) -> Vec<SentimentAnalysis> {
    vec![
        make_analysis(
            "NVDA",
            weights,
            [0.8, 0.7, 0.6],
            [900, 300, 120],
            &["earnings", "AI", "guidance"],
        ),
        make_analysis(
            "SOUN",
            weights,
            [0.5, 0.4, 0.1],
            [250, 90, 15],
            &["breakout", "buy"],
        ),
        make_analysis(
            "TSLA",
            weights,
            [-0.4, -0.3, -0.5],
            [450, 280, 90],
            &["recall", "deliveries"],
        ),
        make_analysis(
            "AAPL",
            weights,
            [0.3, 0.2, 0.25],
            [320, 150, 60],
            &["earnings", "buyback"],
        ),
        make_analysis(
            "AMD",
            weights,
            [0.5, 0.45, 0.4],
            [650, 210, 45],
            &["AI", "datacenter"],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_quote_lookup() {
        let quotes = FixtureQuotes::new();
        let q = quotes.quote("NVDA").await.unwrap();
        assert!((q.change_percent - 12.40).abs() < 1e-10);
        assert_eq!(q.volume, 9_500_000);
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_error() {
        let quotes = FixtureQuotes::new();
        let err = quotes.quote("ZZZZ").await.unwrap_err();
        assert!(format!("{err}").contains("ZZZZ"));
    }

    #[tokio::test]
    async fn test_forced_error_and_clear() {
        let quotes = FixtureQuotes::new();
        quotes.set_error("feed down");
        assert!(quotes.movers().await.is_err());
        quotes.clear_error();
        assert!(quotes.movers().await.is_ok());
    }

    #[tokio::test]
    async fn test_batch_default_preserves_order() {
        let quotes = FixtureQuotes::new();
        let symbols = vec!["TSLA".to_string(), "NVDA".to_string()];
        let batch = quotes.quotes(&symbols).await.unwrap();
        assert_eq!(batch[0].symbol, "TSLA");
        assert_eq!(batch[1].symbol, "NVDA");
    }

    #[tokio::test]
    async fn test_trending_symbols_respects_limit() {
        let sentiment = FixtureSentiment::new();
        assert_eq!(sentiment.trending_symbols(1).await.unwrap(), vec!["NVDA"]);
        assert_eq!(sentiment.trending_symbols(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_analysis_consistency() {
        // Derived fields must agree with the aggregation rules.
        let sentiment = FixtureSentiment::new();
        let weights = SourceWeights::default();

        let nvda = sentiment.analyze("NVDA").await.unwrap();
        assert!((nvda.overall_score - weights.combine(&nvda.sources)).abs() < 1e-10);
        assert!(nvda.trending); // twitter has 900 mentions

        let aapl = sentiment.analyze("AAPL").await.unwrap();
        assert!(!aapl.trending); // no source above 500 mentions
    }

    #[tokio::test]
    async fn test_insert_overrides() {
        let mut quotes = FixtureQuotes::new();
        quotes.insert(make_quote("NVDA", 500.0, 2.0, 1_000));
        let q = quotes.quote("NVDA").await.unwrap();
        assert_eq!(q.volume, 1_000);
    }

    #[test]
    fn test_make_quote_change_is_consistent() {
        let q = make_quote("XYZ", 200.0, 5.0, 1);
        assert!((q.change - 10.0).abs() < 1e-10);
    }
}
