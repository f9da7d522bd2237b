//! Debug configurations - the launch settings a host gets bound into.
//!
//! A configuration names a debug target, the engine family driving it, the
//! host it runs on, and the compiler set it builds with. Stored as TOML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::engine::EngineKind;
use crate::core::host::{ConnectionDescriptor, LOCAL_HOST};

/// A debug launch configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfiguration {
    /// Configuration name.
    pub name: String,

    /// Desired debugger engine family.
    pub engine: EngineKind,

    /// Bound execution host; `None` means the local machine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<ConnectionDescriptor>,

    /// Name of the bound compiler set on that host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_set: Option<String>,
}

impl DebugConfiguration {
    /// Create a configuration with no host binding.
    pub fn new(name: impl Into<String>, engine: EngineKind) -> Self {
        DebugConfiguration {
            name: name.into(),
            engine,
            host: None,
            compiler_set: None,
        }
    }

    /// The host key shown to users: the encoded descriptor, or `localhost`
    /// when no remote host is bound.
    pub fn host_label(&self) -> String {
        match &self.host {
            Some(desc) => desc.to_string(),
            None => LOCAL_HOST.to_string(),
        }
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse configuration: {}", path.display()))
    }

    /// Save a configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("failed to serialize configuration")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write configuration: {}", path.display()))
    }
}
