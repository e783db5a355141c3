// One-shot flight monitoring job, meant to be run by a cron scheduler.
// Prints a text report, or the JSON envelope when started with --json.
use anyhow::Context;
use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use flights_alert::report::DEFAULT_REPORT_LIMIT;
use flights_alert::{destinations, render_report, FlightsService, MonitorConfig, MonitorError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(started_at = %Local::now().to_rfc3339(), "flights scheduler job started");

    let as_json = std::env::args().skip(1).any(|arg| arg == "--json");
    if let Err(err) = run(as_json).await {
        error!(error = %err, "flights scheduler job failed");
        return Err(err).context("flights scheduler job failed");
    }

    info!("flights scheduler job completed");
    Ok(())
}

async fn run(as_json: bool) -> Result<(), MonitorError> {
    let config = MonitorConfig::from_env()?;
    let service = FlightsService::with_http(config)?;

    let envelope = service.get_flights().await;
    let names = destinations(&envelope.offers);
    info!(
        status = envelope.status,
        offers = envelope.offers.len(),
        destinations = ?names,
        "search finished"
    );

    if as_json {
        println!("{}", envelope.to_json()?);
    } else {
        println!("{}", render_report(&envelope, DEFAULT_REPORT_LIMIT));
    }
    Ok(())
}
