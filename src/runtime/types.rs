// ABOUTME: Runtime endpoint parsed from a Docker-style connection string.
// ABOUTME: Supports Unix sockets and plain TCP/HTTP daemons.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Connection string used when nothing is configured.
pub const DEFAULT_ENDPOINT: &str = "unix:///var/run/docker.sock";

/// Port assumed for `tcp://host` without an explicit port.
const DEFAULT_TCP_PORT: u16 = 2375;

/// Where the container runtime API listens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum RuntimeEndpoint {
    /// Unix domain socket path.
    Unix(PathBuf),
    /// `host:port` of a plain HTTP daemon.
    Tcp(String),
}

/// Error parsing a connection string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("empty runtime connection string")]
    Empty,

    #[error("unsupported runtime scheme {0:?} (expected unix, tcp or http)")]
    UnsupportedScheme(String),

    #[error("invalid runtime connection string: {0}")]
    Invalid(String),
}

impl RuntimeEndpoint {
    pub fn parse(s: &str) -> Result<Self, EndpointError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EndpointError::Empty);
        }

        if s.starts_with('/') {
            return Ok(Self::Unix(PathBuf::from(s)));
        }

        let Some((scheme, rest)) = s.split_once("://") else {
            return Err(EndpointError::Invalid(s.to_string()));
        };

        match scheme.to_ascii_lowercase().as_str() {
            "unix" => {
                if rest.is_empty() {
                    return Err(EndpointError::Invalid(s.to_string()));
                }
                // unix://relative and unix:///absolute both name a socket path
                let path = if rest.starts_with('/') {
                    rest.to_string()
                } else {
                    format!("/{rest}")
                };
                Ok(Self::Unix(PathBuf::from(path)))
            }
            "tcp" | "http" => {
                let authority = rest.trim_end_matches('/');
                if authority.is_empty() || authority.contains('/') {
                    return Err(EndpointError::Invalid(s.to_string()));
                }
                if has_port(authority) {
                    Ok(Self::Tcp(authority.to_string()))
                } else {
                    Ok(Self::Tcp(format!("{authority}:{DEFAULT_TCP_PORT}")))
                }
            }
            other => Err(EndpointError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Connection string form, as accepted by the runtime client.
    pub fn to_url(&self) -> String {
        match self {
            Self::Unix(path) => format!("unix://{}", path.display()),
            Self::Tcp(authority) => format!("tcp://{authority}"),
        }
    }

    /// Value for the HTTP `Host` header.
    pub fn host_header(&self) -> &str {
        match self {
            Self::Unix(_) => "localhost",
            Self::Tcp(authority) => authority,
        }
    }
}

fn has_port(authority: &str) -> bool {
    // [::1]:2375 vs [::1]
    let host_end = authority.rfind(']').map(|i| i + 1).unwrap_or(0);
    authority[host_end..]
        .rsplit_once(':')
        .is_some_and(|(_, port)| port.parse::<u16>().is_ok())
}

impl Default for RuntimeEndpoint {
    fn default() -> Self {
        Self::Unix(PathBuf::from("/var/run/docker.sock"))
    }
}

impl FromStr for RuntimeEndpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RuntimeEndpoint {
    type Error = EndpointError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl std::fmt::Display for RuntimeEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_url())
    }
}
