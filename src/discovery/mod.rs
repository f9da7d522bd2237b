//! Toolchain discovery - enumerating compilers and debuggers on a host.
//!
//! [`ToolchainEnumerator`] is the seam between the validation pipeline and
//! whatever actually inspects a host. The default [`ProbeEnumerator`] locates
//! tools with `which`-style lookup and `--version` probes, locally or over
//! ssh. [`ToolchainBinding`] layers the process-wide cache on top.

use thiserror::Error;

use crate::core::host::ConnectionDescriptor;
use crate::core::toolchain::{DebuggerTool, PlatformInfo, ToolchainEntry};

mod binding;
mod probe;

pub use binding::ToolchainBinding;
pub use probe::{CommandRunner, LocalRunner, ProbeEnumerator, SshRunner};

/// Error during toolchain or platform discovery on a host.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("tool probe `{tool}` failed on `{host}`")]
    Probe {
        host: ConnectionDescriptor,
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot determine the platform of `{host}`")]
    Platform {
        host: ConnectionDescriptor,
        #[source]
        source: anyhow::Error,
    },
}

/// Enumerates the tools available on a host.
///
/// All methods block; they run remote commands for non-local descriptors.
/// An empty result is a valid outcome, not an error.
pub trait ToolchainEnumerator: Send + Sync {
    /// Discover compiler sets (without debuggers attached).
    fn discover_compilers(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<Vec<ToolchainEntry>, DiscoveryError>;

    /// Discover standalone debugger tools.
    fn discover_debuggers(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<Vec<DebuggerTool>, DiscoveryError>;

    /// Query platform metadata.
    fn platform_info_for(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<PlatformInfo, DiscoveryError>;
}
