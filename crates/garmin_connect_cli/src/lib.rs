//! Command-line client for Garmin Connect activities: list, view, export,
//! rename and delete recorded workouts.

use std::io::Write;
use std::path::Path;

use garmin_connect_client::config::Config;
use garmin_connect_client::http_client::ReqwestConnectClient;

pub mod cli;
pub mod commands;
pub mod domains;
pub mod error;
pub mod exitcode;
pub mod logging;
pub mod output;

mod test_utils;

pub use cli::{ActivitiesCommand, Cli, Commands, ViewCommand};
pub use error::{CliError, CliResult};

/// Build the client configuration. Values given on the command line (or through
/// their clap env fallbacks) win; everything else is read through `get`.
pub fn load_config<F>(cli: &Cli, mut get: F) -> CliResult<Config>
where
    F: FnMut(&str) -> Option<String>,
{
    let config = Config::from_env_with(|key| match key {
        "GARMIN_CONNECT_BASE_URL" => cli.base_url.clone().or_else(|| get(key)),
        "GARMIN_CONNECT_SESSION" => cli.session.clone().or_else(|| get(key)),
        _ => get(key),
    })?;
    Ok(config)
}

/// Execute one parsed invocation against the live service.
pub async fn run(cli: Cli) -> CliResult<()> {
    let config = load_config(&cli, |key| std::env::var(key).ok())?;
    tracing::debug!(base_url = %config.base_url, "using service");
    let client = ReqwestConnectClient::from_config(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(&cli.command, &client, &mut out, Path::new(".")).await?;
    out.flush()?;
    Ok(())
}
