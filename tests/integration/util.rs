use std::{ffi::OsString, path::Path, process::Command};

pub fn abs_path(path: &str) -> OsString {
    let path = Path::new(path);

    if path.exists() {
        path.canonicalize().unwrap().into_os_string()
    } else {
        path.to_owned().into_os_string()
    }
}

const UPSMON_EXE_PATH: &str = env!("CARGO_BIN_EXE_upsmon");
const DEFAULT_CFG: [&str; 2] = ["-C", "./tests/valid_configs/empty_config.toml"];

/// Returns the [`Command`] of a binary invocation of upsmon. A path following
/// `-C` is made absolute.
pub fn upsmon_command(args: &[&str]) -> Command {
    let mut cmd = Command::new(UPSMON_EXE_PATH);

    let mut prev = "";
    for arg in args.iter() {
        if prev == "-C" {
            cmd.arg(abs_path(arg));
        } else {
            cmd.arg(arg);
        }

        prev = arg;
    }

    cmd
}

/// Returns the [`Command`] of a binary invocation of upsmon with the empty
/// config file, so only arguments count.
pub fn no_cfg_upsmon_command() -> Command {
    upsmon_command(&DEFAULT_CFG)
}
