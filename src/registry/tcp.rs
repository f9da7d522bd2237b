//! Default host registry backed by TCP reachability checks.

use std::collections::HashMap;
use std::net::TcpStream;
use std::sync::RwLock;

use crate::core::host::{ConnectionDescriptor, ConnectionState, HostKeyError};
use crate::registry::{HostList, HostRegistry};

/// A registry that brings hosts online with a blocking TCP connect.
///
/// Connection state is tracked per descriptor. There is deliberately no
/// connect timeout; a hung connect blocks its caller until the OS gives up.
pub struct TcpHostRegistry {
    list: HostList,
    states: RwLock<HashMap<ConnectionDescriptor, ConnectionState>>,
}

impl TcpHostRegistry {
    /// Create a registry over a host list.
    pub fn new(list: HostList) -> Self {
        TcpHostRegistry {
            states: RwLock::new(HashMap::new()),
            list,
        }
    }

    fn set_state(&self, desc: &ConnectionDescriptor, state: ConnectionState) {
        self.states.write().unwrap().insert(desc.clone(), state);
    }
}

impl HostRegistry for TcpHostRegistry {
    fn descriptor_for(&self, key: &str) -> Result<ConnectionDescriptor, HostKeyError> {
        ConnectionDescriptor::parse(key)
    }

    fn bring_online(&self, desc: &ConnectionDescriptor) -> ConnectionState {
        self.set_state(desc, ConnectionState::Connecting);
        tracing::debug!(host = %desc, "connecting");

        let state = match TcpStream::connect((desc.host.as_str(), desc.port)) {
            Ok(_) => ConnectionState::Online,
            Err(e) => {
                tracing::warn!(host = %desc, "connect failed: {}", e);
                ConnectionState::Failed
            }
        };

        self.set_state(desc, state);
        state
    }

    fn state(&self, desc: &ConnectionDescriptor) -> ConnectionState {
        self.states
            .read()
            .unwrap()
            .get(desc)
            .copied()
            .unwrap_or(ConnectionState::Offline)
    }

    fn known_host_keys(&self) -> Vec<String> {
        self.list.keys()
    }
}
