//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

use super::CliError;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. JSON output is meant for
/// containers, pretty output for local development.
pub fn init_tracing(config: &ServerConfig) -> Result<(), CliError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| CliError::Logging(e.to_string()))?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| CliError::Logging(e.to_string()))
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().pretty().with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| CliError::Logging(e.to_string()))
    }
}
