//! External data collaborators.
//!
//! Defines the `QuoteProvider` and `SentimentProvider` traits the scan
//! pipeline depends on. Production implementations would call real market
//! and sentiment APIs; `fixture` supplies deterministic in-memory
//! implementations for tests and dry runs.

pub mod fixture;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{MoverSnapshot, Quote, SentimentAnalysis};

/// Abstraction over market-data sources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current quote snapshot for one symbol.
    async fn quote(&self, symbol: &str) -> Result<Quote>;

    /// Fetch the premarket mover lists (gainers, losers, volume spikes).
    async fn movers(&self) -> Result<MoverSnapshot>;

    /// Fetch quotes for several symbols. The default fetches sequentially;
    /// implementations with a batch endpoint should override.
    async fn quotes(&self, symbols: &[String]) -> Result<Vec<Quote>> {
        let mut out = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            out.push(self.quote(symbol).await?);
        }
        Ok(out)
    }

    /// Provider name for logging and diagnostics.
    fn name(&self) -> &str;
}

/// Abstraction over sentiment-signal sources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Aggregate sentiment for one symbol across all configured sources.
    async fn analyze(&self, symbol: &str) -> Result<SentimentAnalysis>;

    /// The most-discussed symbols right now, most active first.
    async fn trending_symbols(&self, limit: usize) -> Result<Vec<String>>;

    /// Analyze several symbols. Sequential by default; override for
    /// sources with batch APIs.
    async fn analyze_batch(&self, symbols: &[String]) -> Result<Vec<SentimentAnalysis>> {
        let mut out = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            out.push(self.analyze(symbol).await?);
        }
        Ok(out)
    }

    /// Provider name for logging and diagnostics.
    fn name(&self) -> &str;
}
