//! Reads UPS status from macOS's `pmset -g batt`.
//!
//! The report looks like this:
//!
//! ```text
//! Now drawing from 'AC Power'
//!  -CP1500PFCLCD (id=17825794)	100%; AC attached; not charging present: true
//! ```
//!
//! The first line is a summary and is ignored. Every other non-empty line
//! describes one power source. The format is entirely position-based, so all
//! knowledge of it lives in this file.

use std::{num::ParseIntError, process::Stdio};

use thiserror::Error;
use tokio::process::Command;

use super::{StatusSource, UpsData};
use crate::utils::error::{self, UpsmonError};

const MODEL_MARKER_LEN: usize = 1;
const ID_PREFIX: &str = "(id=";
const ID_SUFFIX: &str = ")";

const AC_ATTACHED: &str = "AC attached";
const NOT_CHARGING: &str = "not charging";
const CHARGING: &str = "charging";
const PRESENT: &str = "present: true";

/// A single malformed line in a `pmset` report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLineError {
    #[error("failed to parse pmset line (missing status segment): '{line}'")]
    Segments { line: String },
    #[error("failed to parse pmset line (malformed name and id): '{line}'")]
    NameAndId { line: String },
    #[error("failed to parse pmset line (malformed id token '{token}'): '{line}'")]
    Id { token: String, line: String },
    #[error("failed to parse pmset line (missing battery percentage): '{line}'")]
    Percentage { line: String },
    #[error("failed to parse string '{value}' into int: '{source}'")]
    PercentageValue {
        value: String,
        line: String,
        source: ParseIntError,
    },
}

impl ParseLineError {
    /// The trimmed line that failed to parse.
    pub fn line(&self) -> &str {
        match self {
            ParseLineError::Segments { line }
            | ParseLineError::NameAndId { line }
            | ParseLineError::Id { line, .. }
            | ParseLineError::Percentage { line }
            | ParseLineError::PercentageValue { line, .. } => line,
        }
    }
}

/// The result of parsing a full `pmset` report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Present units, in report order.
    pub units: Vec<UpsData>,
    /// One entry per malformed line, in report order.
    pub errors: Vec<ParseLineError>,
}

/// Parses the stdout of `pmset -g batt`.
///
/// This never fails as a whole; malformed lines are collected into
/// [`ParseReport::errors`] and skipped.
pub fn parse_report(report: &str) -> ParseReport {
    let mut parsed = ParseReport::default();

    // `lines` also strips a trailing `\r`, so a line holding only `\r` counts as
    // empty and is skipped rather than reported.
    for line in report.lines().skip(1) {
        if line.is_empty() {
            continue;
        }

        match parse_line(line.trim()) {
            Ok(Some(unit)) => parsed.units.push(unit),
            Ok(None) => {}
            Err(err) => parsed.errors.push(err),
        }
    }

    parsed
}

/// Parses a single, already trimmed, line. Returns `Ok(None)` for units that
/// are not present.
fn parse_line(line: &str) -> Result<Option<UpsData>, ParseLineError> {
    let (name_and_id, status) =
        split_exactly_once(line, '\t').ok_or_else(|| ParseLineError::Segments {
            line: line.to_string(),
        })?;

    let (model_token, id_token) =
        split_exactly_once(name_and_id, ' ').ok_or_else(|| ParseLineError::NameAndId {
            line: line.to_string(),
        })?;

    let model = strip_model_marker(model_token);
    let id = strip_id_wrapper(id_token).ok_or_else(|| ParseLineError::Id {
        token: id_token.to_string(),
        line: line.to_string(),
    })?;

    let ac_attached = status.contains(AC_ATTACHED);
    let charging = is_charging(status);

    if !status.contains(PRESENT) {
        return Ok(None);
    }

    let battery_charge_percent = battery_percent(status, line)?;

    Ok(Some(UpsData {
        model: model.to_string(),
        id: id.to_string(),
        ac_attached,
        charging,
        battery_charge_percent,
    }))
}

/// Splits `s` on `sep`, but only if `sep` occurs exactly once.
fn split_exactly_once(s: &str, sep: char) -> Option<(&str, &str)> {
    s.split_once(sep).filter(|(_, rest)| !rest.contains(sep))
}

/// Drops the leading marker character (usually `-`) from the model token.
fn strip_model_marker(token: &str) -> &str {
    let start = token
        .char_indices()
        .nth(MODEL_MARKER_LEN)
        .map_or(token.len(), |(idx, _)| idx);

    &token[start..]
}

/// Unwraps `(id=NNNN)` into `NNNN`. The prefix and suffix are stripped by
/// length, not content.
fn strip_id_wrapper(token: &str) -> Option<&str> {
    let prefix_len = ID_PREFIX.chars().count();
    let suffix_len = ID_SUFFIX.chars().count();

    let start = token
        .char_indices()
        .nth(prefix_len)
        .map(|(idx, _)| idx)
        .or_else(|| (token.chars().count() == prefix_len).then_some(token.len()))?;
    let end = token
        .char_indices()
        .rev()
        .nth(suffix_len - 1)
        .map(|(idx, _)| idx)?;

    (start <= end).then(|| &token[start..end])
}

/// "not charging" has to be checked first, since it contains "charging".
fn is_charging(status: &str) -> bool {
    if status.contains(NOT_CHARGING) {
        false
    } else {
        status.contains(CHARGING)
    }
}

fn battery_percent(status: &str, line: &str) -> Result<i64, ParseLineError> {
    let (pct, _) = split_exactly_once(status, '%').ok_or_else(|| ParseLineError::Percentage {
        line: line.to_string(),
    })?;

    let pct = pct.trim();
    pct.parse::<i64>()
        .map_err(|source| ParseLineError::PercentageValue {
            value: pct.to_string(),
            line: line.to_string(),
            source,
        })
}

/// Polls UPS status by running `pmset -g batt`.
#[derive(Debug, Clone)]
pub struct PmsetSource {
    program: String,
}

impl Default for PmsetSource {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_PMSET_PATH)
    }
}

impl PmsetSource {
    /// Creates a source that runs `program` instead of the default `pmset`.
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program being run.
    pub fn program(&self) -> &str {
        &self.program
    }

    async fn read_report(&self) -> error::Result<String> {
        let output = Command::new(&self.program)
            .args(["-g", "batt"])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| UpsmonError::Query(format!("'{}': {err}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(UpsmonError::Query(format!(
                "'{}' {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl StatusSource for PmsetSource {
    async fn read_units(&self) -> error::Result<Vec<UpsData>> {
        let report = self.read_report().await?;
        let ParseReport { units, errors } = parse_report(&report);

        for err in &errors {
            log::warn!("{err}");
        }
        log::debug!("read {} present UPS(s) from {}", units.len(), self.program);

        Ok(units)
    }
}
