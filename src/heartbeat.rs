//! External liveness reporting.
//!
//! The heartbeat URL is only pinged while UPS statistics are actually being
//! delivered: if the last successful write is older than the liveness
//! threshold, pings stop until writes succeed again.

use std::{
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use reqwest::Client;

use crate::{
    constants::{HEARTBEAT_INTERVAL, HEARTBEAT_LIVENESS_THRESHOLD},
    utils::{
        cancellation_token::CancellationToken,
        error::{self, UpsmonError},
        url::parse_http_url,
    },
};

pub struct Heartbeat {
    url: String,
    interval: Duration,
    liveness_threshold: Duration,
    last_alive: Mutex<Option<Instant>>,
    http_client: Client,
}

impl Heartbeat {
    /// Creates a heartbeat with the default 60s interval and 120s liveness
    /// threshold.
    pub fn new<S: Into<String>>(url: S) -> error::Result<Self> {
        Self::with_timing(url, HEARTBEAT_INTERVAL, HEARTBEAT_LIVENESS_THRESHOLD)
    }

    pub fn with_timing<S: Into<String>>(
        url: S, interval: Duration, liveness_threshold: Duration,
    ) -> error::Result<Self> {
        let url = url.into();
        if parse_http_url(&url).is_none() {
            return Err(UpsmonError::Heartbeat(format!(
                "'{url}' must be a valid HTTP/HTTPS URL"
            )));
        }

        // A ping shouldn't be able to outlive the next one.
        let http_client = Client::builder()
            .timeout(interval)
            .build()
            .map_err(|err| UpsmonError::Heartbeat(err.to_string()))?;

        Ok(Self {
            url,
            interval,
            liveness_threshold,
            last_alive: Mutex::new(None),
            http_client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Records a successful delivery at `at`. Older timestamps than the one
    /// already recorded are ignored.
    pub fn alive(&self, at: Instant) {
        let mut last_alive = self.last_alive.lock().unwrap_or_else(PoisonError::into_inner);

        match *last_alive {
            Some(prev) if prev >= at => {}
            _ => *last_alive = Some(at),
        }
    }

    /// Whether a successful delivery happened within the liveness threshold
    /// of `now`.
    pub fn is_live(&self, now: Instant) -> bool {
        let last_alive = *self.last_alive.lock().unwrap_or_else(PoisonError::into_inner);

        last_alive
            .map(|at| now.saturating_duration_since(at) < self.liveness_threshold)
            .unwrap_or(false)
    }

    async fn ping(&self) -> error::Result<()> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| UpsmonError::Heartbeat(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(UpsmonError::Heartbeat(format!(
                "GET '{}' returned {status}",
                self.url
            )))
        }
    }

    /// Pings the URL if live. Returns whether a ping was sent successfully.
    pub async fn beat(&self) -> bool {
        if !self.is_live(Instant::now()) {
            log::debug!("no recent successful writes; skipping heartbeat");
            return false;
        }

        match self.ping().await {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    /// Beats every interval until `token` is cancelled.
    pub async fn run(&self, token: &CancellationToken) {
        while !token.sleep_with_cancellation(self.interval).await {
            self.beat().await;
        }

        log::debug!("heartbeat stopped");
    }
}
