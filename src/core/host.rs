//! Host identity - WHICH execution environment a host key refers to.
//!
//! A host key is an opaque string like `user@build-server:22`. The reserved
//! key `localhost` denotes the local machine and never triggers network
//! activity. Everything else decodes into a [`ConnectionDescriptor`], the
//! structured form used for connecting and for keying cached toolchain state.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved host key for the local machine.
///
/// Matched by exact equality; no parsing is attempted on it.
pub const LOCAL_HOST: &str = "localhost";

/// Check whether a host key names the local machine.
pub fn is_local(key: &str) -> bool {
    key == LOCAL_HOST
}

/// Error produced when a host key cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostKeyError {
    #[error("host key is empty")]
    Empty,

    #[error("host key `{0}` has an empty host part")]
    MissingHost(String),

    #[error("host key `{0}` has an empty user part")]
    MissingUser(String),

    #[error("host key `{0}` has an invalid port")]
    InvalidPort(String),
}

/// Default SSH port used when a host key omits the port.
pub const DEFAULT_PORT: u16 = 22;

/// A decoded remote execution environment: `[user@]host[:port]`.
///
/// Decoding is deterministic - the same host key always yields an equal
/// descriptor - and [`fmt::Display`] is the matching encode half, so a
/// descriptor round-trips through its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    /// Login user, if the key carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Host name or address.
    pub host: String,
    /// TCP port, defaulting to [`DEFAULT_PORT`].
    pub port: u16,
}

impl ConnectionDescriptor {
    /// Decode a host key into a descriptor.
    ///
    /// Accepts `host`, `host:port`, `user@host`, and `user@host:port`.
    /// The local sentinel is not special-cased here; callers short-circuit
    /// with [`is_local`] before any decode.
    pub fn parse(key: &str) -> Result<Self, HostKeyError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(HostKeyError::Empty);
        }

        let (user, rest) = match key.split_once('@') {
            Some((user, rest)) => {
                if user.is_empty() {
                    return Err(HostKeyError::MissingUser(key.to_string()));
                }
                (Some(user.to_string()), rest)
            }
            None => (None, key),
        };

        let (host, port) = match rest.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .ok()
                    .filter(|p| *p != 0)
                    .ok_or_else(|| HostKeyError::InvalidPort(key.to_string()))?;
                (host, port)
            }
            None => (rest, DEFAULT_PORT),
        };

        if host.is_empty() || host.contains('@') || host.contains(char::is_whitespace) {
            return Err(HostKeyError::MissingHost(key.to_string()));
        }

        Ok(ConnectionDescriptor {
            user,
            host: host.to_string(),
            port,
        })
    }

    /// The display name used in user-facing messages.
    pub fn display_name(&self) -> String {
        match &self.user {
            Some(user) => format!("{}@{}", user, self.host),
            None => self.host.clone(),
        }
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref user) = self.user {
            write!(f, "{}@", user)?;
        }
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Connection lifecycle of a remote host.
///
/// `Offline -> Connecting` when a validation begins, then `Online` or
/// `Failed`. A host may later drop back to `Offline` through mechanisms
/// outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Offline,
    Connecting,
    Online,
    Failed,
}

impl ConnectionState {
    /// Short status label for listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Offline => "offline",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Online => "online",
            ConnectionState::Failed => "failed",
        }
    }
}
