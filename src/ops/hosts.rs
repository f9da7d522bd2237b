//! Implementation of `berth hosts`.

use anyhow::{Context, Result};

use crate::core::host::is_local;
use crate::registry::{HostList, HostRegistry, TcpHostRegistry};

/// Options for the hosts command.
#[derive(Debug, Clone, Default)]
pub struct HostsOptions {
    /// Probe each remote host's reachability while listing
    pub probe: bool,
}

/// List the known hosts, optionally probing their state.
pub fn list_hosts(opts: &HostsOptions) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let list = HostList::load_merged(&cwd)?;
    let registry = TcpHostRegistry::new(list.clone());

    for record in &list.hosts {
        let label = record.display_name.as_deref().unwrap_or("-");

        let state = if is_local(&record.key) {
            "local"
        } else if opts.probe {
            match registry.descriptor_for(&record.key) {
                Ok(desc) => registry.bring_online(&desc).as_str(),
                Err(_) => "invalid key",
            }
        } else {
            registry
                .descriptor_for(&record.key)
                .map(|desc| registry.state(&desc).as_str())
                .unwrap_or("invalid key")
        };

        println!("{:<32} {:<20} {}", record.key, label, state);
    }

    Ok(())
}
