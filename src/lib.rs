//! A small daemon that polls UPS status from `pmset -g batt`, writes it to
//! InfluxDB, and optionally pings a heartbeat URL while doing so.

pub mod utils {
    pub mod cancellation_token;
    pub mod error;
    pub mod logging;
    pub mod retry;
    pub mod url;
}
pub mod app;
pub mod collection;
pub mod constants;
pub mod heartbeat;
pub mod influx;
pub mod options;

use std::sync::Arc;

use anyhow::{Context, Result};

use app::Monitor;
use collection::pmset::PmsetSource;
use heartbeat::Heartbeat;
use options::MonitorSettings;
use utils::cancellation_token::CancellationToken;

/// Connects to InfluxDB, then polls until `token` is cancelled.
///
/// Errors here are startup errors; once polling has started, failures are
/// only logged.
pub async fn start_upsmon(settings: MonitorSettings, token: Arc<CancellationToken>) -> Result<()> {
    let heartbeat = settings
        .heartbeat_url
        .as_deref()
        .map(Heartbeat::new)
        .transpose()
        .context("failed to create heartbeat client")?
        .map(Arc::new);

    let client = influx::connect(settings.influx.clone())
        .await
        .context("failed to check InfluxDB health")?;

    let mut monitor = Monitor::new(
        PmsetSource::new(settings.pmset_path.as_str()),
        client,
        settings.measurement_name.as_str(),
        settings.ups_nametag.as_str(),
    );
    if let Some(heartbeat) = &heartbeat {
        monitor = monitor.with_heartbeat(heartbeat.clone());
    }

    log::info!(
        "polling '{}' every {} as '{}'",
        settings.pmset_path,
        humantime::format_duration(settings.poll_interval),
        settings.ups_nametag
    );

    match &heartbeat {
        Some(heartbeat) => {
            log::info!("sending heartbeats to {}", heartbeat.url());
            tokio::join!(
                monitor.run(settings.poll_interval, &token),
                heartbeat.run(&token)
            );
        }
        None => monitor.run(settings.poll_interval, &token).await,
    }

    Ok(())
}
