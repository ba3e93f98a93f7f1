//! Human-readable pick justifications.
//!
//! Rules are evaluated in a fixed order and each appends at most one note;
//! the output order is part of the contract. The volume threshold here is
//! a fixed share count, deliberately independent of the scorer's
//! config-driven volume tiers (two distinct volume notions, kept as-is).

use std::collections::HashSet;

use crate::types::{Quote, SentimentAnalysis, SentimentSource};

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// |change %| above this is worth a price-movement note.
const STRONG_MOVE_PCT: f64 = 5.0;

/// Share volume above this is worth a volume note.
const HIGH_VOLUME_SHARES: u64 = 5_000_000;

const VERY_POSITIVE_SENTIMENT: f64 = 0.5;
const POSITIVE_SENTIMENT: f64 = 0.2;

/// At most this many deduplicated keywords in the key-topics note.
const MAX_KEY_TOPICS: usize = 3;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Derive the ordered justification list for one symbol. May be empty.
pub fn reasons(quote: &Quote, sentiment: &SentimentAnalysis) -> Vec<String> {
    let mut reasons = Vec::new();

    if quote.change_percent.abs() > STRONG_MOVE_PCT {
        reasons.push(format!(
            "Strong price movement: {:+.2}%",
            quote.change_percent
        ));
    }

    if quote.volume > HIGH_VOLUME_SHARES {
        reasons.push(format!(
            "High volume: {:.1}M shares",
            quote.volume as f64 / 1_000_000.0
        ));
    }

    if sentiment.overall_score > VERY_POSITIVE_SENTIMENT {
        reasons.push(format!(
            "Very positive sentiment ({:.0}%)",
            sentiment.overall_score * 100.0
        ));
    } else if sentiment.overall_score > POSITIVE_SENTIMENT {
        reasons.push(format!(
            "Positive sentiment ({:.0}%)",
            sentiment.overall_score * 100.0
        ));
    }

    if sentiment.trending {
        reasons.push("Trending on social media".to_string());
    }

    let topics = key_topics(&sentiment.sources);
    if !topics.is_empty() {
        reasons.push(format!("Key topics: {}", topics.join(", ")));
    }

    reasons
}

/// Union of keywords across sources, deduplicated preserving first-seen
/// order, capped at `MAX_KEY_TOPICS`.
fn key_topics(sources: &[SentimentSource]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut topics = Vec::new();
    for keyword in sources.iter().flat_map(|s| s.keywords.iter()) {
        if seen.insert(keyword.as_str()) {
            topics.push(keyword.clone());
            if topics.len() == MAX_KEY_TOPICS {
                break;
            }
        }
    }
    topics
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
