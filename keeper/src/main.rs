//! Collateral pool operator
//!
//! Runs a scripted ledger session against in-memory assets and prints the
//! emitted events with a final balance report as JSON.
//!
//! Usage:
//!   pool-operator                 run the configured scenario
//!   pool-operator <scenario>      run a specific scenario file
//!   pool-operator init            write default config and example scenario

mod config;
mod scenario;
mod session;

use anyhow::{Context, Result};
use config::OperatorConfig;
use scenario::Scenario;
use serde::Serialize;
use session::{Report, Session};

#[derive(Serialize)]
struct Output {
    events: Vec<collateral_pool::PoolEvent>,
    report: Report,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("init") {
        let config_path = OperatorConfig::path();
        OperatorConfig::write_default(&config_path)?;
        Scenario::write_example(&OperatorConfig::default_local().scenario_path())?;
        return Ok(());
    }

    log::info!("Starting collateral pool operator");

    // Load configuration
    let config = OperatorConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({:#}), using default local config", e);
        OperatorConfig::default_local()
    });

    log::info!("Reserve: {}", config.reserve);
    log::info!("Owner: {}", config.owner);
    log::info!("Premium rate: {} bps", config.premium_rate_bps);

    let scenario_path = match arg {
        Some(path) => shellexpand::tilde(&path).into_owned(),
        None => config.scenario_path(),
    };
    let scenario = Scenario::load(&scenario_path)?;
    log::info!("Loaded {} steps from {}", scenario.steps.len(), scenario_path);

    let mut session = Session::new(&config)?;
    let summary = session.run(&scenario.steps);
    log::info!(
        "Scenario finished: {} succeeded, {} failed",
        summary.succeeded,
        summary.failed
    );

    let output = Output {
        events: session.events(),
        report: session.report(),
    };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
    println!("{}", json);

    Ok(())
}
