//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Scanner thresholds are validated up front; a scan is rejected on
//! out-of-range values rather than silently clamped.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::sentiment::SourceWeights;
use crate::types::ScoutError;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub scan: ScanSettings,
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub sentiment: SourceWeights,
}

/// Settings for the binary's scan loop.
#[derive(Debug, Deserialize, Clone)]
pub struct ScanSettings {
    pub interval_secs: u64,
    /// Maximum number of picks reported per cycle.
    pub limit: usize,
    /// Bound on concurrent per-candidate quote/sentiment fetches.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
}

fn default_fetch_concurrency() -> usize {
    8
}

/// Scanner thresholds and filters, as consumed by the scoring pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct ScannerConfig {
    /// Minimum confidence for a pick to survive the scan, in [0.0, 1.0].
    pub min_confidence_score: f64,
    /// Volume threshold feeding the scorer's volume tiers.
    pub min_volume_threshold: u64,
    /// Sentiment sources callers intend to consult. Informational; the
    /// scorer does not enforce membership.
    #[serde(default)]
    pub sentiment_sources: Vec<String>,
    /// Sector filter. Currently unused by scoring.
    #[serde(default)]
    pub sectors: Vec<String>,
    /// Keyword filter. Currently unused by scoring.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            min_confidence_score: 0.6,
            min_volume_threshold: 1_000_000,
            sentiment_sources: vec![
                "twitter".to_string(),
                "reddit".to_string(),
                "news".to_string(),
            ],
            sectors: vec![
                "Technology".to_string(),
                "Healthcare".to_string(),
                "Finance".to_string(),
            ],
            keywords: vec![
                "earnings".to_string(),
                "merger".to_string(),
                "FDA approval".to_string(),
            ],
        }
    }
}

impl ScannerConfig {
    /// Reject out-of-range thresholds. Bounds are inclusive; anything
    /// outside [0.0, 1.0] (including NaN) is a caller contract violation.
    pub fn validate(&self) -> Result<(), ScoutError> {
        if !(0.0..=1.0).contains(&self.min_confidence_score) {
            return Err(ScoutError::Config(format!(
                "min_confidence_score must be within [0.0, 1.0], got {}",
                self.min_confidence_score,
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config
            .scanner
            .validate()
            .with_context(|| format!("Invalid scanner settings in {path}"))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scanner_config_is_valid() {
        let cfg = ScannerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.min_volume_threshold, 1_000_000);
        assert_eq!(cfg.sentiment_sources, vec!["twitter", "reddit", "news"]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_confidence() {
        let cfg = ScannerConfig {
            min_confidence_score: 1.01,
            ..ScannerConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err}").contains("min_confidence_score"));

        let cfg = ScannerConfig {
            min_confidence_score: -0.1,
            ..ScannerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let cfg = ScannerConfig {
            min_confidence_score: f64::NAN,
            ..ScannerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_inclusive_bounds() {
        for value in [0.0, 1.0] {
            let cfg = ScannerConfig {
                min_confidence_score: value,
                ..ScannerConfig::default()
            };
            assert!(cfg.validate().is_ok(), "bound {value} should be valid");
        }
    }

    #[test]
    fn test_parse_full_config() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [scan]
            interval_secs = 600
            limit = 10

            [scanner]
            min_confidence_score = 0.6
            min_volume_threshold = 1000000
            sentiment_sources = ["twitter", "reddit", "news"]
            sectors = ["Technology"]
            keywords = ["earnings"]

            [sentiment.weights]
            twitter = 0.4
            reddit = 0.3
            news = 0.3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.scan.interval_secs, 600);
        assert_eq!(cfg.scan.fetch_concurrency, 8); // default
        assert!((cfg.sentiment.weight_for("twitter") - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_load_config_file() {
        // Requires config.toml in the working directory; tolerated if absent.
        if let Ok(cfg) = AppConfig::load("config.toml") {
            assert!(cfg.scan.limit >= 1);
            assert!(cfg.scanner.validate().is_ok());
        }
    }
}
