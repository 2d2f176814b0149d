//! The optional TOML config file. Every setting here can also be given as an
//! argument, and arguments win.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub influx: InfluxSection,
    #[serde(default)]
    pub ups: UpsSection,
    #[serde(default)]
    pub general: GeneralSection,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InfluxSection {
    pub server: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bucket: Option<String>,
    pub measurement_name: Option<String>,
    pub timeout: Option<StringOrNum>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpsSection {
    pub nametag: Option<String>,
    pub poll_interval: Option<StringOrNum>,
    pub pmset_path: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GeneralSection {
    pub heartbeat_url: Option<String>,
    pub log_file: Option<String>,
    #[serde(default)]
    pub debug: bool,
}

/// A duration given either as a number of seconds or as a human duration
/// string like `"1m 30s"`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StringOrNum {
    String(String),
    Num(u64),
}
