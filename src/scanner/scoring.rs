//! Confidence scoring.
//!
//! Additive point model on a 0–100 raw scale, normalized to [0, 1].
//! Four factors: sentiment (0–30), volume (0–25), price momentum (0–25),
//! and trending status (0–20). All tier comparisons are strict
//! greater-than; the sentiment branch boundary at 0.3 is intentional and
//! must not be smoothed (0.3 exactly takes the proportional branch).

use crate::config::ScannerConfig;
use crate::types::{Quote, SentimentAnalysis};

// ---------------------------------------------------------------------------
// Point tiers
// ---------------------------------------------------------------------------

/// Sentiment above this earns the full-weight branch.
const STRONG_SENTIMENT: f64 = 0.3;
const SENTIMENT_MAX_POINTS: f64 = 30.0;
const WEAK_SENTIMENT_MAX_POINTS: f64 = 15.0;

const VOLUME_DOUBLE_POINTS: f64 = 25.0;
const VOLUME_ABOVE_POINTS: f64 = 15.0;

/// Momentum tiers on |change_percent|: (threshold, points), highest first.
const MOMENTUM_TIERS: [(f64, f64); 3] = [(10.0, 25.0), (5.0, 15.0), (2.0, 10.0)];

const TRENDING_POINTS: f64 = 20.0;

const RAW_SCALE: f64 = 100.0;

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Compute the confidence score for one symbol. Pure and deterministic;
/// always within [0.0, 1.0].
pub fn confidence_score(
    quote: &Quote,
    sentiment: &SentimentAnalysis,
    config: &ScannerConfig,
) -> f64 {
    let raw = sentiment_points(sentiment.overall_score)
        + volume_points(quote.volume, config.min_volume_threshold)
        + momentum_points(quote.change_percent)
        + trending_points(sentiment.trending);

    // The tiers sum to exactly 100, but clamp anyway.
    (raw / RAW_SCALE).min(1.0)
}

fn sentiment_points(overall_score: f64) -> f64 {
    if overall_score > STRONG_SENTIMENT {
        SENTIMENT_MAX_POINTS * overall_score
    } else if overall_score > 0.0 {
        WEAK_SENTIMENT_MAX_POINTS * (overall_score / STRONG_SENTIMENT)
    } else {
        0.0
    }
}

fn volume_points(volume: u64, min_volume_threshold: u64) -> f64 {
    if volume > min_volume_threshold.saturating_mul(2) {
        VOLUME_DOUBLE_POINTS
    } else if volume > min_volume_threshold {
        VOLUME_ABOVE_POINTS
    } else {
        0.0
    }
}

fn momentum_points(change_percent: f64) -> f64 {
    let abs_change = change_percent.abs();
    for (threshold, points) in MOMENTUM_TIERS {
        if abs_change > threshold {
            return points;
        }
    }
    0.0
}

fn trending_points(trending: bool) -> f64 {
    if trending {
        TRENDING_POINTS
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
