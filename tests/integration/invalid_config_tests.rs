//! These tests are for testing some invalid config-file-specific options.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::upsmon_command;

#[test]
fn test_toml_mismatch_type() {
    upsmon_command(&["-C", "./tests/invalid_configs/toml_mismatch_type.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid type"));
}

#[test]
fn test_malformed_toml() {
    upsmon_command(&["-C", "./tests/invalid_configs/malformed.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to properly parse the config file."));
}

#[test]
fn test_missing_config_file() {
    upsmon_command(&["-C", "./tests/invalid_configs/does_not_exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to read config file"));
}

#[test]
fn test_zero_poll_interval() {
    upsmon_command(&["-C", "./tests/invalid_configs/zero_poll_interval.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'poll_interval' must be greater than 0."));
}

#[test]
fn test_bad_duration() {
    upsmon_command(&["-C", "./tests/invalid_configs/bad_duration.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'timeout' was set with an invalid duration 'whenever'",
        ));
}

#[test]
fn test_bad_server() {
    upsmon_command(&["-C", "./tests/invalid_configs/bad_server.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a valid HTTP/HTTPS URL"));
}

#[test]
fn test_bad_heartbeat_url() {
    upsmon_command(&["-C", "./tests/invalid_configs/bad_heartbeat.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to create heartbeat client"));
}

#[test]
fn test_args_override_config() {
    // The config alone is complete, but the argument makes it invalid.
    upsmon_command(&["-C", "./tests/valid_configs/unreachable_influx.toml"])
        .args(["--poll-interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--poll-interval' must be greater than 0.",
        ));
}

#[test]
fn test_unreachable_influx_from_config() {
    upsmon_command(&["-C", "./tests/valid_configs/unreachable_influx.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to check InfluxDB health"));
}

#[test]
fn test_malformed_server_host() {
    upsmon_command(&["-C", "./tests/invalid_configs/malformed_server_host.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a valid HTTP/HTTPS URL"));
}
