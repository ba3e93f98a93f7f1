//! SCOUT: Premarket Stock Scanner
//!
//! Entry point. Loads configuration, initialises structured logging,
//! wires deterministic fixture providers (production market/sentiment
//! feeds plug into the same traits), and runs the scan loop with
//! graceful shutdown.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use scout::config::AppConfig;
use scout::providers::fixture::{FixtureQuotes, FixtureSentiment};
use scout::providers::{QuoteProvider, SentimentProvider};
use scout::scanner::{ScanPipeline, ScanRequest};

const BANNER: &str = r#"
  ____   ____ ___  _   _ _____
 / ___| / ___/ _ \| | | |_   _|
 \___ \| |  | | | | | | | | |
  ___) | |__| |_| | |_| | | |
 |____/ \____\___/ \___/  |_|

  Premarket Stock Scanner
  v0.1.0 (dry-run data mode)
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = AppConfig::load("config.toml")?;

    init_logging();
    println!("{BANNER}");

    // Deterministic fixture feeds. Live market/sentiment integrations
    // implement the same provider traits and swap in here.
    let quotes: Arc<dyn QuoteProvider> = Arc::new(FixtureQuotes::new());
    let sentiment: Arc<dyn SentimentProvider> = Arc::new(FixtureSentiment::new());

    info!(
        quotes = quotes.name(),
        sentiment = sentiment.name(),
        interval_secs = cfg.scan.interval_secs,
        limit = cfg.scan.limit,
        min_confidence = cfg.scanner.min_confidence_score,
        "SCOUT starting up"
    );

    let pipeline = ScanPipeline::new(Arc::clone(&quotes), Arc::clone(&sentiment))
        .with_fetch_concurrency(cfg.scan.fetch_concurrency);
    let request = ScanRequest {
        limit: cfg.scan.limit,
        min_confidence: None,
    };

    let mut interval = tokio::time::interval(Duration::from_secs(cfg.scan.interval_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("Entering scan loop. Press Ctrl+C to stop.");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match pipeline.run(&cfg.scanner, &request).await {
                    Ok(summary) => {
                        info!(%summary, "Cycle complete");
                        for pick in &summary.picks {
                            info!(pick = %pick, "Pick");
                        }
                    }
                    Err(e) => {
                        error!(error = %format!("{e:#}"), "Scan failed, continuing to next cycle");
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    info!("SCOUT shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scout=info"));

    if std::env::var("SCOUT_LOG_JSON").is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
