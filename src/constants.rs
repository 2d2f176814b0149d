use std::time::Duration;

// Status query
pub const DEFAULT_PMSET_PATH: &str = "pmset";

// InfluxDB
pub const DEFAULT_MEASUREMENT_NAME: &str = "ups_stats";
pub const DEFAULT_INFLUX_TIMEOUT: Duration = Duration::from_secs(3);
pub const INFLUX_HEALTH_PASS: &str = "pass";

// Tag and field names
pub const UPS_NAME_TAG: &str = "ups_name";
pub const UPS_MODEL_TAG: &str = "ups_model";
pub const UPS_ID_TAG: &str = "ups_id";
pub const BATTERY_CHARGE_PERCENT_FIELD: &str = "battery_charge_percent";
pub const AC_ATTACHED_FIELD: &str = "ac_attached";

// Polling
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

// Heartbeat
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);
pub const HEARTBEAT_LIVENESS_THRESHOLD: Duration = Duration::from_secs(120);

// Config and flags
pub const DEFAULT_CONFIG_FILE_LOCATION: &str = "upsmon/upsmon.toml";
