//! The poll loop: read UPS status, write it to InfluxDB, and keep the
//! heartbeat fed.

use std::{
    sync::Arc,
    time::{Duration, Instant, SystemTime},
};

use tokio::time::MissedTickBehavior;

use crate::{
    collection::StatusSource,
    heartbeat::Heartbeat,
    influx::{self, PointWriter},
    utils::{cancellation_token::CancellationToken, retry::RetryPolicy},
};

/// What happened during a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The status query failed; nothing was written.
    QueryFailed,
    /// No present UPS was found; nothing was written.
    NoUnits,
    /// Writing failed, even after retrying.
    WriteFailed,
    /// This many points were written.
    Written(usize),
}

pub struct Monitor<S, W> {
    source: S,
    writer: W,
    heartbeat: Option<Arc<Heartbeat>>,
    measurement_name: String,
    ups_nametag: String,
    retry: RetryPolicy,
}

impl<S: StatusSource, W: PointWriter> Monitor<S, W> {
    pub fn new<M: Into<String>, N: Into<String>>(
        source: S, writer: W, measurement_name: M, ups_nametag: N,
    ) -> Self {
        Self {
            source,
            writer,
            heartbeat: None,
            measurement_name: measurement_name.into(),
            ups_nametag: ups_nametag.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Successful writes will mark `heartbeat` as alive.
    pub fn with_heartbeat(mut self, heartbeat: Arc<Heartbeat>) -> Self {
        self.heartbeat = Some(heartbeat);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Runs one sample-parse-write cycle. Errors are logged, never returned.
    ///
    /// If no UPS is present nothing is written, and the heartbeat is not marked
    /// alive either. A host that loses its UPS therefore stops pinging the
    /// heartbeat once the liveness threshold passes.
    pub async fn tick(&self) -> TickOutcome {
        let at_time = SystemTime::now();
        let at_instant = Instant::now();

        let units = match self.source.read_units().await {
            Ok(units) => units,
            Err(err) => {
                log::error!("{err}");
                return TickOutcome::QueryFailed;
            }
        };

        if units.is_empty() {
            log::debug!("no present UPS found; skipping write");
            return TickOutcome::NoUnits;
        }

        let points = influx::ups_points(&self.measurement_name, &self.ups_nametag, &units, at_time);

        match self.retry.retry(|| self.writer.write_points(&points)).await {
            Ok(()) => {
                log::debug!("wrote {} point(s) to InfluxDB", points.len());
                if let Some(heartbeat) = &self.heartbeat {
                    heartbeat.alive(at_instant);
                }
                TickOutcome::Written(points.len())
            }
            Err(err) => {
                log::error!("failed to write to influx: {err}");
                TickOutcome::WriteFailed
            }
        }
    }

    /// Ticks once immediately and then every `poll_interval` until `token` is
    /// cancelled. Ticks never overlap; a slow tick just delays the next one.
    pub async fn run(&self, poll_interval: Duration, token: &CancellationToken) {
        let mut interval = tokio::time::interval(poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while !token.is_cancelled() {
            tokio::select! {
                biased;

                _ = token.cancelled() => break,
                _ = interval.tick() => {}
            }

            self.tick().await;
        }

        log::info!("stopped polling");
    }
}
