//! Host-list persistence.
//!
//! Berth keeps known hosts in TOML:
//! - Global: `~/.berth/hosts.toml` - user-wide host list
//! - Project: `.berth/hosts.toml` - project-specific additions
//!
//! Project records are appended after global ones; a project record with the
//! same key replaces the global record. The validation core only consumes
//! the records, it never writes them back itself.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::host::LOCAL_HOST;
use crate::registry::HostRecord;

/// The list of known hosts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostList {
    /// Known connection targets, in listing order.
    pub hosts: Vec<HostRecord>,
}

impl HostList {
    /// Create an empty host list.
    pub fn new() -> Self {
        HostList::default()
    }

    /// A list containing only the local machine.
    pub fn with_local() -> Self {
        HostList {
            hosts: vec![HostRecord::new(LOCAL_HOST)],
        }
    }

    /// Add a record, replacing any existing record with the same key.
    pub fn add(&mut self, record: HostRecord) {
        if let Some(existing) = self.hosts.iter_mut().find(|h| h.key == record.key) {
            *existing = record;
        } else {
            self.hosts.push(record);
        }
    }

    /// Find a record by host key.
    pub fn by_key(&self, key: &str) -> Option<&HostRecord> {
        self.hosts.iter().find(|h| h.key == key)
    }

    /// Encoded keys in listing order.
    pub fn keys(&self) -> Vec<String> {
        self.hosts.iter().map(|h| h.key.clone()).collect()
    }

    /// Load a host list from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read host list: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse host list: {}", path.display()))
    }

    /// Save the host list to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("failed to serialize host list")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write host list: {}", path.display()))
    }

    /// Load the effective host list for a working directory.
    ///
    /// Merges the global list with the project list, project records
    /// winning on key collisions. Missing files contribute nothing; with
    /// neither file present the list contains just the local machine.
    pub fn load_merged(cwd: &Path) -> Result<Self> {
        let mut list = HostList::with_local();

        if let Some(global) = global_host_list_path() {
            if global.exists() {
                for record in HostList::load(&global)?.hosts {
                    list.add(record);
                }
            }
        }

        let project = project_host_list_path(cwd);
        if project.exists() {
            for record in HostList::load(&project)?.hosts {
                list.add(record);
            }
        }

        Ok(list)
    }
}

/// Path of the global host list (`~/.berth/hosts.toml`).
pub fn global_host_list_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".berth").join("hosts.toml"))
}

/// Path of the project host list (`.berth/hosts.toml` under `cwd`).
pub fn project_host_list_path(cwd: &Path) -> PathBuf {
    cwd.join(".berth").join("hosts.toml")
}
