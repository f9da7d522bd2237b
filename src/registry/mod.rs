//! Host registry - resolving host keys and tracking connection state.
//!
//! The registry is the seam between the validation pipeline and whatever
//! owns the actual connections. The default [`TcpHostRegistry`] keeps host
//! records from the host-list store and brings hosts online with a plain
//! TCP connect.

use serde::{Deserialize, Serialize};

use crate::core::host::{ConnectionDescriptor, ConnectionState, HostKeyError};

mod store;
mod tcp;

pub use store::{global_host_list_path, project_host_list_path, HostList};
pub use tcp::TcpHostRegistry;

/// One known connection target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Encoded host key (e.g. `alice@build-server:22`).
    pub key: String,

    /// Optional label shown in listings instead of the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl HostRecord {
    /// Create a record from a host key.
    pub fn new(key: impl Into<String>) -> Self {
        HostRecord {
            key: key.into(),
            display_name: None,
        }
    }

    /// Set the display label.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Resolves host keys and manages connection state.
pub trait HostRegistry: Send + Sync {
    /// Decode a host key into a connection descriptor.
    ///
    /// Deterministic; fails synchronously on a malformed key.
    fn descriptor_for(&self, key: &str) -> Result<ConnectionDescriptor, HostKeyError>;

    /// Connect the host, blocking until it is `Online` or `Failed`.
    fn bring_online(&self, desc: &ConnectionDescriptor) -> ConnectionState;

    /// Current connection state without touching the network.
    fn state(&self, desc: &ConnectionDescriptor) -> ConnectionState;

    /// Encoded keys of all known connection targets.
    fn known_host_keys(&self) -> Vec<String>;
}
