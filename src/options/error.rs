use std::{borrow::Cow, io, path::Path};

use thiserror::Error;

/// Why the arguments and config file don't add up to usable settings.
///
/// These are shown to the user as is, so say what to fix. Wrap offending
/// names and values in single quotes (e.g. `'30x'`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    /// Something in the config file.
    #[error("Configuration file error: {0}")]
    Config(Cow<'static, str>),
    /// Something in the command-line arguments.
    #[error("Argument error: {0}")]
    Argument(Cow<'static, str>),
    /// The InfluxDB settings, wherever they came from.
    #[error("Invalid InfluxDB settings: {0}")]
    Influx(Cow<'static, str>),
}

impl OptionError {
    pub(crate) fn config<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        OptionError::Config(reason.into())
    }

    pub(crate) fn arg<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        OptionError::Argument(reason.into())
    }

    pub(crate) fn influx<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        OptionError::Influx(reason.into())
    }

    /// A required value that was given neither as an argument nor in the
    /// config file. `flags` names the arguments, e.g. `--ups-nametag`.
    pub(crate) fn missing(flags: &str) -> Self {
        OptionError::arg(format!("{flags} must be supplied."))
    }

    pub(crate) fn unreadable_config(path: &Path, err: &io::Error) -> Self {
        OptionError::config(format!(
            "unable to read config file '{}': {err}",
            path.display()
        ))
    }

    /// A duration argument that is neither whole seconds nor a human
    /// duration.
    pub(crate) fn invalid_duration_arg(name: &str, value: &str) -> Self {
        OptionError::arg(format!(
            "'--{name}' was set with an invalid duration '{value}'; use whole seconds or something like '1m 30s'."
        ))
    }

    /// Same as [`OptionError::invalid_duration_arg`], for a config file key.
    pub(crate) fn invalid_duration_config(key: &str, value: &str) -> Self {
        OptionError::config(format!(
            "'{key}' was set with an invalid duration '{value}'; use whole seconds or something like '1m 30s'."
        ))
    }

    pub(crate) fn zero_duration_arg(name: &str) -> Self {
        OptionError::arg(format!("'--{name}' must be greater than 0."))
    }

    pub(crate) fn zero_duration_config(key: &str) -> Self {
        OptionError::config(format!("'{key}' must be greater than 0."))
    }
}

pub type OptionResult<T> = Result<T, OptionError>;

impl From<toml_edit::de::Error> for OptionError {
    fn from(err: toml_edit::de::Error) -> Self {
        OptionError::Config(err.to_string().into())
    }
}
