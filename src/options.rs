//! How to handle config files and arguments.

/// Argument parsing via clap.
pub mod args;
pub mod config;
pub mod error;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use self::{
    args::UpsmonArgs,
    config::{Config, StringOrNum},
    error::{OptionError, OptionResult},
};
use crate::{constants::*, influx::InfluxConfig};

/// Everything needed to run, after merging arguments over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    pub influx: InfluxConfig,
    pub measurement_name: String,
    pub ups_nametag: String,
    pub poll_interval: Duration,
    pub pmset_path: String,
    pub heartbeat_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

/// Returns the config path to use. If `config_location` is set, that is used;
/// otherwise the default location is used, but only if something exists there.
pub fn get_config_path(config_location: Option<&str>) -> Option<PathBuf> {
    if let Some(conf_loc) = config_location {
        return Some(PathBuf::from(conf_loc));
    }

    dirs::config_dir()
        .map(|path| path.join(DEFAULT_CONFIG_FILE_LOCATION))
        .filter(|path| path.exists())
}

/// Reads and parses the config file at `config_path`, or returns a default
/// config if there is no path.
pub fn read_config(config_path: Option<&Path>) -> OptionResult<Config> {
    match config_path {
        Some(path) => {
            let config_string = fs::read_to_string(path)
                .map_err(|err| OptionError::unreadable_config(path, &err))?;

            Ok(toml_edit::de::from_str(&config_string)?)
        }
        None => Ok(Config::default()),
    }
}

/// Merges the arguments and config file into [`MonitorSettings`],
/// validating the result.
pub fn get_settings(args: &UpsmonArgs, config: &Config) -> OptionResult<MonitorSettings> {
    let influx_args = &args.influx_args;
    let ups_args = &args.ups_args;
    let general_args = &args.general_args;

    let server = pick(&influx_args.influx_server, &config.influx.server);
    let bucket = pick(&influx_args.influx_bucket, &config.influx.bucket);
    let (Some(server), Some(bucket)) = (server, bucket) else {
        return Err(OptionError::missing("--influx-bucket and --influx-server"));
    };

    let Some(ups_nametag) = pick(&ups_args.ups_nametag, &config.ups.nametag) else {
        return Err(OptionError::missing("--ups-nametag"));
    };

    let timeout = get_duration(
        influx_args.influx_timeout.as_deref(),
        config.influx.timeout.as_ref(),
        "influx-timeout",
        "timeout",
        DEFAULT_INFLUX_TIMEOUT,
    )?;

    let poll_interval = get_duration(
        ups_args.poll_interval.as_deref(),
        config.ups.poll_interval.as_ref(),
        "poll-interval",
        "poll_interval",
        DEFAULT_POLL_INTERVAL,
    )?;

    let influx = InfluxConfig {
        server,
        username: pick(&influx_args.influx_username, &config.influx.username).unwrap_or_default(),
        password: pick(&influx_args.influx_password, &config.influx.password).unwrap_or_default(),
        bucket,
        timeout,
    };
    influx.validate().map_err(OptionError::influx)?;

    let heartbeat_url = pick(&general_args.heartbeat_url, &config.general.heartbeat_url);

    Ok(MonitorSettings {
        influx,
        measurement_name: pick(&influx_args.measurement_name, &config.influx.measurement_name)
            .unwrap_or_else(|| DEFAULT_MEASUREMENT_NAME.to_string()),
        ups_nametag,
        poll_interval,
        pmset_path: pick(&ups_args.pmset_path, &config.ups.pmset_path)
            .unwrap_or_else(|| DEFAULT_PMSET_PATH.to_string()),
        heartbeat_url,
        log_file: pick(&general_args.log_file, &config.general.log_file).map(PathBuf::from),
        debug: general_args.debug || config.general.debug,
    })
}

/// Picks the argument value if set, else the config value. Empty strings
/// count as unset.
fn pick(arg: &Option<String>, config: &Option<String>) -> Option<String> {
    arg.as_ref()
        .filter(|s| !s.is_empty())
        .or_else(|| config.as_ref().filter(|s| !s.is_empty()))
        .cloned()
}

fn get_duration(
    arg: Option<&str>, config: Option<&StringOrNum>, arg_name: &str, config_name: &str,
    default: Duration,
) -> OptionResult<Duration> {
    let duration = if let Some(arg) = arg {
        try_parse_duration(arg).map_err(|_| OptionError::invalid_duration_arg(arg_name, arg))?
    } else if let Some(config) = config {
        match config {
            StringOrNum::String(s) => try_parse_duration(s)
                .map_err(|_| OptionError::invalid_duration_config(config_name, s))?,
            StringOrNum::Num(secs) => Duration::from_secs(*secs),
        }
    } else {
        default
    };

    if duration.is_zero() {
        if arg.is_some() {
            Err(OptionError::zero_duration_arg(arg_name))
        } else {
            Err(OptionError::zero_duration_config(config_name))
        }
    } else {
        Ok(duration)
    }
}

/// Parses a duration given in whole seconds or as a human duration.
fn try_parse_duration(s: &str) -> Result<Duration, humantime::DurationError> {
    let s = s.trim();
    match s.parse::<u64>() {
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => humantime::parse_duration(s),
    }
}
