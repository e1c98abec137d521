//! FORKFUND — fork-chain token funding
//!
//! Entry point. Loads configuration, initialises structured logging,
//! attaches to (or spawns) an Anvil fork, drains the configured whales
//! into the recipient and writes the run report.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use forkfund::config::{self, NodeTarget};
use forkfund::engine::Funder;
use forkfund::ledger::anvil::AnvilLedger;
use forkfund::storage::ReportStore;
use forkfund::types::FundingReport;

const BANNER: &str = r#"
  ___ ___  ___ _  _____ _   _ _  _ ___
 | __/ _ \| _ \ |/ / __| | | | \| |   \
 | _| (_) |   / ' <| _|| |_| | .` | |) |
 |_| \___/|_|_\_|\_\_|  \___/|_|\_|___/

  Whale-draining balance acquisition for forked chains
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::var("FORKFUND_CONFIG")
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::AppConfig::load(&config_path)?;

    init_logging();

    println!("{BANNER}");

    let plan = cfg.plan().context("Invalid funding plan")?;
    info!(
        config = %config_path,
        recipient = %plan.recipient,
        tokens = plan.entries.len(),
        "FORKFUND starting up"
    );

    let ledger = match cfg.node_target()? {
        NodeTarget::Attach(url) => AnvilLedger::connect(&url).await?,
        NodeTarget::SpawnFork {
            fork_url,
            fork_block,
        } => AnvilLedger::spawn_fork(&fork_url, fork_block).await?,
    };

    let report = Funder::new(&ledger).run(&plan).await?;
    log_report(&report);

    if let Some(path) = cfg.run.report_path.as_deref() {
        let store = ReportStore::new(path);
        match store.write(&report) {
            Ok(()) => info!(path, "Report saved"),
            Err(e) => error!(error = %e, "Failed to save report"),
        }
    }

    if cfg.run.require_full && !report.is_fully_funded() {
        anyhow::bail!(
            "Funding incomplete: {} short, {} failed verification",
            report.shortfalls().len(),
            report.verification_failures().len()
        );
    }

    Ok(())
}

/// Log a human-readable per-token summary.
fn log_report(report: &FundingReport) {
    for token in &report.tokens {
        let acq = &token.acquisition;
        if acq.is_complete() {
            info!(
                symbol = %token.symbol,
                acquired = %acq.acquired,
                holders_tried = acq.attempts.len(),
                rejected = acq.rejected().count(),
                balance_after = %token.balance_after,
                verified = ?token.verified,
                "Token funded"
            );
        } else {
            warn!(
                symbol = %token.symbol,
                acquired = %acq.acquired,
                desired = %acq.target.desired,
                shortfall = %acq.shortfall(),
                rejected = acq.rejected().count(),
                "Token short"
            );
        }
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("forkfund=info"));

    let json_logging = std::env::var("FORKFUND_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
