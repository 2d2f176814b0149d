//! InfluxDB output.
//!
//! UPS readings are converted into points by [`adapter`], encoded with
//! [`point`] into line protocol, and written by [`client::InfluxClient`]
//! through InfluxDB's v2 write API (which InfluxDB 1.8+ also serves).

pub mod adapter;
pub mod client;
pub mod config;
pub mod point;

pub use adapter::ups_points;
pub use client::{HealthCheck, InfluxClient};
pub use config::InfluxConfig;
pub use point::{FieldValue, Point};

use crate::utils::error::{self, UpsmonError};

/// Somewhere points can be written to.
#[allow(async_fn_in_trait)]
pub trait PointWriter {
    async fn write_points(&self, points: &[Point]) -> error::Result<()>;
}

/// Creates a client and checks that the server reports itself healthy.
///
/// This is meant to be called once on startup; any error is fatal.
pub async fn connect(config: InfluxConfig) -> error::Result<InfluxClient> {
    let client = InfluxClient::new(config)?;
    let health = client.health().await?;

    if !health.is_pass() {
        return Err(UpsmonError::Sink(format!(
            "InfluxDB did not pass health check: status {}; message '{}'",
            health.status,
            health.message.as_deref().unwrap_or_default()
        )));
    }

    log::info!(
        "connected to InfluxDB at {} (version {})",
        client.config().server,
        health.version.as_deref().unwrap_or("unknown")
    );

    Ok(client)
}
