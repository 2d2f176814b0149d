use std::time::Duration;

use crate::{constants::DEFAULT_INFLUX_TIMEOUT, utils::url::parse_http_url};

/// Connection settings for InfluxDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluxConfig {
    /// Server URL including protocol and port, e.g. `http://localhost:8086`.
    pub server: String,
    pub username: String,
    pub password: String,
    /// Either `database/retention-policy` or just `database`.
    pub bucket: String,
    /// Timeout applied to each request.
    pub timeout: Duration,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            username: String::new(),
            password: String::new(),
            bucket: String::new(),
            timeout: DEFAULT_INFLUX_TIMEOUT,
        }
    }
}

impl InfluxConfig {
    /// The value of the `Authorization` header, if any credentials are set.
    ///
    /// InfluxDB 1.8+ accepts `username:password` as a token on its 2.x
    /// compatible endpoints.
    pub fn auth_token(&self) -> Option<String> {
        if self.username.is_empty() && self.password.is_empty() {
            None
        } else {
            Some(format!("Token {}:{}", self.username, self.password))
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.is_empty() {
            return Err("InfluxDB server cannot be empty".to_string());
        }

        if parse_http_url(&self.server).is_none() {
            return Err(format!(
                "InfluxDB server '{}' must be a valid HTTP/HTTPS URL",
                self.server
            ));
        }

        if self.bucket.is_empty() {
            return Err("InfluxDB bucket cannot be empty".to_string());
        }

        if self.timeout.is_zero() {
            return Err("InfluxDB timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> InfluxConfig {
        InfluxConfig {
            server: "http://localhost:8086".to_string(),
            bucket: "ups".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn default_timeout() {
        assert_eq!(InfluxConfig::default().timeout, Duration::from_secs(3));
    }

    #[test]
    fn auth_token() {
        assert_eq!(config().auth_token(), None);

        let with_user = InfluxConfig {
            username: "admin".to_string(),
            ..config()
        };
        assert_eq!(with_user.auth_token().as_deref(), Some("Token admin:"));

        let with_both = InfluxConfig {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
            ..config()
        };
        assert_eq!(with_both.auth_token().as_deref(), Some("Token admin:hunter2"));
    }

    #[test]
    fn validation() {
        assert!(config().validate().is_ok());

        assert!(InfluxConfig {
            server: String::new(),
            ..config()
        }
        .validate()
        .is_err());

        assert!(InfluxConfig {
            server: "localhost:8086".to_string(),
            ..config()
        }
        .validate()
        .is_err());

        assert!(InfluxConfig {
            server: "http://influx host:8086".to_string(),
            ..config()
        }
        .validate()
        .is_err());

        assert!(InfluxConfig {
            bucket: String::new(),
            ..config()
        }
        .validate()
        .is_err());

        assert!(InfluxConfig {
            timeout: Duration::ZERO,
            ..config()
        }
        .validate()
        .is_err());
    }
}
