//! These tests are mostly here just to ensure that invalid results will be
//! caught when passing arguments.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::no_cfg_upsmon_command;

const REQUIRED: [&str; 6] = [
    "--influx-server",
    "http://127.0.0.1:1",
    "--influx-bucket",
    "ups",
    "--ups-nametag",
    "office",
];

#[test]
fn test_missing_server_and_bucket() {
    no_cfg_upsmon_command()
        .args(["--ups-nametag", "office"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "--influx-bucket and --influx-server must be supplied.",
        ));
}

#[test]
fn test_missing_bucket() {
    no_cfg_upsmon_command()
        .args(["--influx-server", "http://127.0.0.1:1", "--ups-nametag", "office"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be supplied"));
}

#[test]
fn test_missing_nametag() {
    no_cfg_upsmon_command()
        .args(["--influx-server", "http://127.0.0.1:1", "--influx-bucket", "ups"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--ups-nametag must be supplied."));
}

#[test]
fn test_empty_nametag() {
    no_cfg_upsmon_command()
        .args([
            "--influx-server",
            "http://127.0.0.1:1",
            "--influx-bucket",
            "ups",
            "--ups-nametag",
            "",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--ups-nametag must be supplied."));
}

#[test]
fn test_invalid_poll_interval() {
    no_cfg_upsmon_command()
        .args(REQUIRED)
        .args(["--poll-interval", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--poll-interval' was set with an invalid duration 'sometimes'",
        ));
}

#[test]
fn test_zero_poll_interval() {
    no_cfg_upsmon_command()
        .args(REQUIRED)
        .args(["--poll-interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--poll-interval' must be greater than 0.",
        ));
}

#[test]
fn test_zero_influx_timeout() {
    no_cfg_upsmon_command()
        .args(REQUIRED)
        .args(["--influx-timeout", "0s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--influx-timeout' must be greater than 0.",
        ));
}

#[test]
fn test_invalid_server_scheme() {
    no_cfg_upsmon_command()
        .args([
            "--influx-server",
            "localhost:8086",
            "--influx-bucket",
            "ups",
            "--ups-nametag",
            "office",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a valid HTTP/HTTPS URL"));
}

#[test]
fn test_unreachable_influx() {
    no_cfg_upsmon_command()
        .args(REQUIRED)
        .args(["--influx-timeout", "1s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to check InfluxDB health"));
}

#[test]
fn test_unknown_flag() {
    no_cfg_upsmon_command()
        .arg("--rate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_version() {
    no_cfg_upsmon_command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help() {
    no_cfg_upsmon_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--influx-server"))
        .stdout(predicate::str::contains("--ups-nametag"));
}
