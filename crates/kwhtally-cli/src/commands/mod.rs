mod hourly;
mod summary;

use kwhtally_core::{TibberAdapter, TibberConfig};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let adapter = build_adapter(cli)?;

    match &cli.command {
        Command::Hourly(args) => hourly::run(args, &adapter).await,
        Command::Summary(range) => summary::run(range, &adapter).await,
    }
}

fn build_adapter(cli: &Cli) -> Result<TibberAdapter, CliError> {
    let mut config = TibberConfig::from_env()?;
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    tracing::debug!(?config, "using tibber configuration");
    Ok(TibberAdapter::new(config))
}
