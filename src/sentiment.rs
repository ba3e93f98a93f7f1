//! Sentiment aggregation rules.
//!
//! Combines per-source sentiment scores into a single overall score using
//! an explicit source-name → weight table, and decides the "trending" flag
//! from per-source mention counts. Kept separate from the providers so the
//! weighting is auditable and testable per source name.

use serde::Deserialize;
use std::collections::HashMap;

use crate::types::SentimentSource;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A symbol is trending when any single source reports more mentions
/// than this.
pub const TRENDING_MENTIONS: u64 = 500;

/// Weight applied to a source whose name is not in the table.
const FALLBACK_WEIGHT: f64 = 0.33;

/// Source-name-keyed weights for the overall sentiment score.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceWeights {
    /// Per-source weights, keyed by source name.
    #[serde(default)]
    pub weights: HashMap<String, f64>,
    /// Weight for sources not present in the table.
    #[serde(default = "default_fallback_weight")]
    pub fallback_weight: f64,
}

fn default_fallback_weight() -> f64 {
    FALLBACK_WEIGHT
}

impl Default for SourceWeights {
    fn default() -> Self {
        let mut weights = HashMap::new();
        weights.insert("twitter".to_string(), 0.4);
        weights.insert("reddit".to_string(), 0.3);
        weights.insert("news".to_string(), 0.3);
        Self {
            weights,
            fallback_weight: FALLBACK_WEIGHT,
        }
    }
}

impl SourceWeights {
    /// The weight for a given source name.
    pub fn weight_for(&self, name: &str) -> f64 {
        self.weights.get(name).copied().unwrap_or(self.fallback_weight)
    }

    /// Weighted mean of per-source scores. Returns 0.0 for an empty slice
    /// or an all-zero weight table.
    pub fn combine(&self, sources: &[SentimentSource]) -> f64 {
        let mut total_score = 0.0;
        let mut total_weight = 0.0;

        for source in sources {
            let weight = self.weight_for(&source.name);
            total_score += source.score * weight;
            total_weight += weight;
        }

        if total_weight > 0.0 {
            total_score / total_weight
        } else {
            0.0
        }
    }
}

/// Whether any single source exceeds the mention threshold.
pub fn is_trending(sources: &[SentimentSource]) -> bool {
    sources.iter().any(|s| s.mentions > TRENDING_MENTIONS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
