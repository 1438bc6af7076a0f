// ABOUTME: Environment variable overrides for configuration.
// ABOUTME: Empty values are treated as unset.

use super::Config;
use crate::error::{Error, Result};
use crate::runtime::RuntimeEndpoint;
use std::time::Duration;

/// Runtime connection string, shared with the Docker CLI.
pub const ENV_HOST: &str = "DOCKER_HOST";
/// HTTP listen address.
pub const ENV_BIND: &str = "DOCKLOG_BIND";
/// Runtime request timeout in seconds.
pub const ENV_TIMEOUT: &str = "DOCKLOG_TIMEOUT";
/// Stop grace period in seconds.
pub const ENV_STOP_TIMEOUT: &str = "DOCKLOG_STOP_TIMEOUT";

pub(super) fn apply(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(host) = var(ENV_HOST) {
        config.host = RuntimeEndpoint::parse(&host)?;
    }

    if let Some(bind) = var(ENV_BIND) {
        config.bind = bind
            .trim()
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("{ENV_BIND}={bind}: {e}")))?;
    }

    if let Some(secs) = var(ENV_TIMEOUT) {
        config.timeout = parse_secs(ENV_TIMEOUT, &secs)?;
    }

    if let Some(secs) = var(ENV_STOP_TIMEOUT) {
        config.stop_timeout = Some(parse_secs(ENV_STOP_TIMEOUT, &secs)?);
    }

    Ok(config)
}

fn parse_secs(name: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| Error::InvalidConfig(format!("{name}={value}: {e}")))
}
