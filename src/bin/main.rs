use std::sync::Arc;

use anyhow::{Context, Result};

use upsmon::{
    options::{args, get_config_path, get_settings, read_config},
    start_upsmon,
    utils::{cancellation_token::CancellationToken, logging::init_logger},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = args::get_args();

    let config_path = get_config_path(args.general_args.config_location.as_deref());
    let config = read_config(config_path.as_deref())
        .context("Unable to properly parse the config file.")?;
    let settings = get_settings(&args, &config)?;

    let level = if settings.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    init_logger(level, settings.log_file.as_deref()).context("Unable to set up logging.")?;

    if let Some(path) = &config_path {
        log::debug!("using config file at {}", path.display());
    }

    // Set up the termination handler; polling stops once any in-flight tick is done.
    let token = Arc::new(CancellationToken::default());
    {
        let token = token.clone();
        ctrlc::set_handler(move || {
            log::info!("received termination signal, shutting down");
            token.cancel();
        })
        .context("Unable to set the termination handler.")?;
    }

    start_upsmon(settings, token).await
}
