use anyhow::Result;
use placescout::{config::Config, crawler, ids::UuidGen, storage};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    storage::reset_outputs(&config);

    let ids = UuidGen;
    let records = crawler::run(&config, &ids).await;

    if records.is_empty() {
        warn!("run produced no records");
        return Ok(());
    }

    info!(count = records.len(), "crawl finished");
    if let Err(e) = storage::save_records(&records, config.output_file()) {
        // Already-extracted records are not rolled back; report and exit.
        error!(error = %e, "failed to persist records");
    }

    Ok(())
}
