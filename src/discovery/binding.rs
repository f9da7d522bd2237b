//! Cached toolchain state, keyed by connection descriptor.
//!
//! The cache is shared process-wide and read-mostly. A refresh rebuilds the
//! whole entry and swaps it in atomically; readers hold `Arc` snapshots and
//! keep seeing the old set until the swap, never a half-written one. Only
//! the validation worker mutates a given entry, so the map lock is held just
//! long enough to swap.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::host::ConnectionDescriptor;
use crate::core::toolchain::{DebuggerTool, PlatformInfo, ToolchainEntry, ToolchainSet};
use crate::discovery::{DiscoveryError, ToolchainEnumerator};

/// Maps a host's connection descriptor to its discovered toolchain state.
pub struct ToolchainBinding {
    enumerator: Arc<dyn ToolchainEnumerator>,
    toolchains: RwLock<HashMap<ConnectionDescriptor, Arc<ToolchainSet>>>,
    platforms: RwLock<HashMap<ConnectionDescriptor, Arc<PlatformInfo>>>,
}

impl ToolchainBinding {
    /// Create a binding over the given enumerator.
    pub fn new(enumerator: Arc<dyn ToolchainEnumerator>) -> Self {
        ToolchainBinding {
            enumerator,
            toolchains: RwLock::new(HashMap::new()),
            platforms: RwLock::new(HashMap::new()),
        }
    }

    /// Re-discover the host's toolchain and replace its cache entry.
    ///
    /// Blocking. With a force flag cleared, the corresponding tool class is
    /// reused from the cached set instead of re-probed; with no cached set
    /// both classes are discovered regardless. An empty resulting set is
    /// valid and is cached like any other.
    pub fn refresh(
        &self,
        desc: &ConnectionDescriptor,
        force_compilers: bool,
        force_debuggers: bool,
    ) -> Result<Arc<ToolchainSet>, DiscoveryError> {
        let cached = self.cached(desc);

        let mut entries: Vec<ToolchainEntry> = match &cached {
            Some(set) if !force_compilers => set.iter().cloned().collect(),
            _ => {
                tracing::debug!(host = %desc, "discovering compilers");
                self.enumerator.discover_compilers(desc)?
            }
        };

        if force_debuggers || cached.is_none() {
            tracing::debug!(host = %desc, "discovering debuggers");
            let debuggers = self.enumerator.discover_debuggers(desc)?;
            for entry in &mut entries {
                entry.debugger = None;
            }
            attach_debuggers(&mut entries, debuggers);
        }

        let set = Arc::new(ToolchainSet::from_entries(entries));
        self.toolchains
            .write()
            .unwrap()
            .insert(desc.clone(), Arc::clone(&set));

        tracing::debug!(host = %desc, sets = set.len(), "toolchain cache replaced");
        Ok(set)
    }

    /// Platform metadata for the host, discovered once and then cached.
    pub fn platform_info(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<Arc<PlatformInfo>, DiscoveryError> {
        if let Some(info) = self.platforms.read().unwrap().get(desc) {
            return Ok(Arc::clone(info));
        }

        let info = Arc::new(self.enumerator.platform_info_for(desc)?);
        self.platforms
            .write()
            .unwrap()
            .insert(desc.clone(), Arc::clone(&info));
        Ok(info)
    }

    /// Snapshot of the host's cached toolchain set, if one exists.
    pub fn cached(&self, desc: &ConnectionDescriptor) -> Option<Arc<ToolchainSet>> {
        self.toolchains.read().unwrap().get(desc).cloned()
    }
}

/// Preferred debugger tool for a compiler set family.
fn preferred_debugger(family: &str) -> Option<&'static str> {
    match family {
        "GNU" => Some("gdb"),
        "LLVM" => Some("lldb"),
        "OracleDeveloperStudio" => Some("dbx"),
        _ => None,
    }
}

/// Attach discovered debuggers to their preferred compiler sets.
fn attach_debuggers(entries: &mut [ToolchainEntry], debuggers: Vec<DebuggerTool>) {
    for entry in entries {
        let Some(wanted) = preferred_debugger(&entry.name) else {
            continue;
        };
        if let Some(tool) = debuggers.iter().find(|d| d.name == wanted) {
            entry.debugger = Some(tool.clone());
        }
    }
}
