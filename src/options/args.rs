// Argument parsing via clap.
//
// This file is also pulled into build.rs with `include!`, so keep it self-contained and
// free of inner doc comments.

use clap::*;
use indoc::indoc;

const TEMPLATE: &str = indoc! {
    "{name} {version}

    {about}

    {usage-heading} {usage}

    {all-args}"
};

const USAGE: &str = "upsmon [OPTIONS] --influx-server <URL> --influx-bucket <BUCKET> --ups-nametag <NAME>";

const VERSION: &str = match option_env!("NIGHTLY_VERSION") {
    Some(nightly_version) => nightly_version,
    None => crate_version!(),
};

/// The arguments for upsmon.
#[derive(Parser, Debug, Default)]
#[command(
    name = crate_name!(),
    version = VERSION,
    about = crate_description!(),
    disable_help_flag = true,
    disable_version_flag = true,
    color = ColorChoice::Auto,
    help_template = TEMPLATE,
    override_usage = USAGE,
)]
pub struct UpsmonArgs {
    #[command(flatten)]
    pub influx_args: InfluxArgs,

    #[command(flatten)]
    pub ups_args: UpsArgs,

    #[command(flatten)]
    pub general_args: GeneralArgs,

    #[command(flatten)]
    pub other_args: OtherArgs,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "InfluxDB Options")]
pub struct InfluxArgs {
    #[arg(
        long,
        value_name = "URL",
        help = "InfluxDB server, including protocol and port. Required.",
        long_help = "InfluxDB server, including protocol and port, e.g. 'http://192.168.1.1:8086'. Required, \
                    either here or in the config file."
    )]
    pub influx_server: Option<String>,

    #[arg(long, value_name = "USER", help = "InfluxDB username.")]
    pub influx_username: Option<String>,

    #[arg(long, value_name = "PASS", help = "InfluxDB password.")]
    pub influx_password: Option<String>,

    #[arg(
        long,
        value_name = "BUCKET",
        help = "InfluxDB bucket, in the form 'database/retention-policy'. Required.",
        long_help = "InfluxDB bucket. Supply a string in the form 'database/retention-policy'. For the default \
                    retention policy, pass just a database name (without the slash character). Required, \
                    either here or in the config file."
    )]
    pub influx_bucket: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "InfluxDB measurement name. Defaults to 'ups_stats'."
    )]
    pub measurement_name: Option<String>,

    #[arg(
        long,
        value_name = "TIME",
        help = "Timeout for writing to InfluxDB. Defaults to 3s.",
        long_help = "Timeout for each request made to InfluxDB. Takes a number in seconds or a human \
                    duration (e.g. 1500ms). The default is 3s."
    )]
    pub influx_timeout: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "UPS Options")]
pub struct UpsArgs {
    #[arg(
        long,
        value_name = "NAME",
        help = "Value for the ups_name tag in InfluxDB. Required.",
        long_help = "Value for the ups_name tag in InfluxDB. If more than one UPS is present, each point's tag \
                    is suffixed with '|<id>'. Required, either here or in the config file."
    )]
    pub ups_nametag: Option<String>,

    #[arg(
        long,
        value_name = "TIME",
        help = "Polling interval. Defaults to 30s.",
        long_help = "How often to poll UPS status. Takes a number in seconds or a human duration \
                    (e.g. 1m). The default is 30s."
    )]
    pub poll_interval: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Path to the pmset binary. Defaults to 'pmset'."
    )]
    pub pmset_path: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "General Options")]
pub struct GeneralArgs {
    #[arg(
        short = 'C',
        long,
        value_name = "PATH",
        help = "Sets the location of the config file.",
        long_help = "Sets the location of the config file. Expects a config file in the TOML format. \
                    Values given as arguments take precedence over values from the config file."
    )]
    pub config_location: Option<String>,

    #[arg(
        long,
        value_name = "URL",
        help = "URL to GET every 60s while statistics are being written.",
        long_help = "URL to GET every 60s, if and only if the program has successfully sent UPS statistics \
                    to InfluxDB in the past 120s."
    )]
    pub heartbeat_url: Option<String>,

    #[arg(long, value_name = "PATH", help = "Also writes logs to the given file.")]
    pub log_file: Option<String>,

    #[arg(long, help = "Enables debug logging.")]
    pub debug: bool,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Other Options")]
pub struct OtherArgs {
    #[arg(short='h', long, action=ArgAction::Help, help="Prints help info.")]
    help: (),

    #[arg(short='V', long, action=ArgAction::Version, help="Prints version information.")]
    version: (),
}

/// Returns a [`Command`] for upsmon.
pub fn build_cmd() -> Command {
    UpsmonArgs::command()
}

/// Returns an [`UpsmonArgs`].
pub fn get_args() -> UpsmonArgs {
    UpsmonArgs::parse()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verify_cli() {
        build_cmd().debug_assert();
    }

    #[test]
    fn no_default_help_heading() {
        let mut cmd = build_cmd();
        let help_str = cmd.render_help();

        assert!(
            !help_str.to_string().contains("\nOptions:\n"),
            "the default 'Options' heading should not exist; if it does then an argument is \
            missing a help heading."
        );
    }

    #[test]
    fn parses_influx_flags() {
        let args = UpsmonArgs::try_parse_from([
            "upsmon",
            "--influx-server",
            "http://localhost:8086",
            "--influx-bucket",
            "ups/autogen",
            "--ups-nametag",
            "office",
            "--poll-interval",
            "1m",
        ])
        .unwrap();

        assert_eq!(
            args.influx_args.influx_server.as_deref(),
            Some("http://localhost:8086")
        );
        assert_eq!(args.influx_args.influx_bucket.as_deref(), Some("ups/autogen"));
        assert_eq!(args.ups_args.ups_nametag.as_deref(), Some("office"));
        assert_eq!(args.ups_args.poll_interval.as_deref(), Some("1m"));
        assert!(args.general_args.heartbeat_url.is_none());
        assert!(!args.general_args.debug);
    }
}
