// ABOUTME: Configuration types and loading for docklog.
// ABOUTME: Optional YAML file, then environment overrides read once at startup.

mod env;

pub use env::{ENV_BIND, ENV_HOST, ENV_STOP_TIMEOUT, ENV_TIMEOUT};

use crate::error::{Error, Result};
use crate::runtime::RuntimeEndpoint;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "docklog.yml";
pub const CONFIG_FILENAME_ALT: &str = "docklog.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".docklog/config.yml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Runtime connection string.
    #[serde(default)]
    pub host: RuntimeEndpoint,

    /// HTTP listen address.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Upper bound for a single runtime request.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Grace period for stop requests; runtime default when unset.
    #[serde(default, with = "humantime_serde")]
    pub stop_timeout: Option<Duration>,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: RuntimeEndpoint::default(),
            bind: default_bind(),
            timeout: default_timeout(),
            stop_timeout: None,
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, or defaults when there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        match candidates.iter().find(|path| path.exists()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Full startup resolution: explicit or discovered file, then environment.
    pub fn resolve(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load(path)?,
            None => Self::discover(dir)?,
        };
        config.with_env()
    }

    /// Apply environment overrides.
    pub fn with_env(self) -> Result<Self> {
        env::apply(self, |name| std::env::var(name).ok())?.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}
