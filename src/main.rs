use anyhow::Result;
use jemena_outlook::cache::MetricsCache;
use jemena_outlook::client::OutlookClient;
use jemena_outlook::config::Config;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    jemena_outlook::logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Jemena Electricity Outlook client starting up");

    let client = OutlookClient::new(&config.portal);
    let cache = MetricsCache::new(
        Box::new(client),
        Duration::from_secs(config.refresh.min_interval_hours * 3600),
    );

    let scan_interval = Duration::from_secs(config.refresh.scan_interval_hours * 3600);
    let mut ticker = tokio::time::interval(scan_interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // A portal outage must not take the process down; the next
                // scheduled tick is the only retry.
                match cache.refresh().await {
                    Ok(outcome) => {
                        let data = cache.get_data().await;
                        info!(metrics = data.len(), ?outcome, "Refresh complete");
                    }
                    Err(e) => error!("Refresh failed: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
