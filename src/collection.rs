//! UPS status collection.

pub mod pmset;

use crate::utils::error;

/// One UPS (or battery) reported as present by the power-status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsData {
    /// Model name, e.g. `CP1500PFCLCD`.
    pub model: String,
    /// Identifier distinguishing multiple units.
    pub id: String,
    /// Whether the unit is drawing from line power.
    pub ac_attached: bool,
    /// Whether the unit is actively charging.
    pub charging: bool,
    /// Reported state of charge.
    pub battery_charge_percent: i64,
}

/// Something that can be polled for the current set of present UPS units.
#[allow(async_fn_in_trait)]
pub trait StatusSource {
    /// Reads the current UPS status. An error here means the whole query
    /// failed; malformed individual lines are not errors.
    async fn read_units(&self) -> error::Result<Vec<UpsData>>;
}
