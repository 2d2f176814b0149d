use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use super::{
    config::InfluxConfig,
    point::{self, Point},
    PointWriter,
};
use crate::{
    constants::INFLUX_HEALTH_PASS,
    utils::error::{self, UpsmonError},
};

/// The response of InfluxDB's `/health` endpoint.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct HealthCheck {
    pub status: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthCheck {
    pub fn is_pass(&self) -> bool {
        self.status == INFLUX_HEALTH_PASS
    }
}

/// A minimal client for InfluxDB's v2 HTTP API.
#[derive(Debug, Clone)]
pub struct InfluxClient {
    config: InfluxConfig,
    http_client: Client,
}

impl InfluxClient {
    pub fn new(config: InfluxConfig) -> error::Result<Self> {
        config.validate().map_err(UpsmonError::Sink)?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("upsmon/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &InfluxConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.server.trim_end_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.auth_token() {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, token),
            None => request,
        }
    }

    /// Queries the server's health.
    ///
    /// A server reporting itself as unhealthy (e.g. a 503 with a `fail`
    /// status) is not an error here; check [`HealthCheck::is_pass`].
    pub async fn health(&self) -> error::Result<HealthCheck> {
        let response = self
            .authorize(self.http_client.get(self.url("/health")))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        serde_json::from_str::<HealthCheck>(&body).map_err(|err| {
            UpsmonError::Sink(format!(
                "unexpected health response ({status}): {err}; body '{}'",
                body.trim()
            ))
        })
    }

    /// Writes a batch of points in a single request.
    pub async fn write(&self, points: &[Point]) -> error::Result<()> {
        let body = point::to_line_protocol(points);

        let response = self
            .authorize(self.http_client.post(self.url("/api/v2/write")))
            .query(&[
                ("bucket", self.config.bucket.as_str()),
                ("org", ""),
                ("precision", "ns"),
            ])
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await?;

        check_response(response).await
    }
}

async fn check_response(response: Response) -> error::Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|err| err.message)
        .unwrap_or(body);

    Err(UpsmonError::Sink(format!(
        "write failed with status {status}: {}",
        message.trim()
    )))
}

impl PointWriter for InfluxClient {
    async fn write_points(&self, points: &[Point]) -> error::Result<()> {
        self.write(points).await
    }
}
