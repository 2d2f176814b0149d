use std::result;

use thiserror::Error;

/// A type alias for handling errors related to upsmon.
pub type Result<T> = result::Result<T, UpsmonError>;

/// An error that can occur while upsmon runs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpsmonError {
    /// An error when the UPS status query could not be run or failed.
    #[error("pmset read failed: {0}")]
    Query(String),
    /// An error when talking to InfluxDB.
    #[error("InfluxDB error, {0}")]
    Sink(String),
    /// An error when pinging the heartbeat URL.
    #[error("heartbeat error: {0}")]
    Heartbeat(String),
}

impl From<reqwest::Error> for UpsmonError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpsmonError::Sink(format!("request timed out: {err}"))
        } else {
            UpsmonError::Sink(err.to_string())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn query_error_message() {
        let err = UpsmonError::Query("exit status: 1".to_string());
        assert_eq!(err.to_string(), "pmset read failed: exit status: 1");
    }

    #[test]
    fn sink_error_message() {
        let err = UpsmonError::Sink("bucket not found".to_string());
        assert_eq!(err.to_string(), "InfluxDB error, bucket not found");
    }

    #[tokio::test]
    async fn reqwest_errors_become_sink_errors() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/health")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(UpsmonError::from(err), UpsmonError::Sink(_)));
    }
}
