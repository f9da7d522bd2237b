//! High-level operations.
//!
//! This module contains the implementation of Berth commands.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::discovery::{ProbeEnumerator, ToolchainBinding};
use crate::registry::{HostList, TcpHostRegistry};
use crate::validator::{ConsoleReporter, DirectContext, HostValidator};

pub mod bind;
pub mod hosts;
pub mod validate;

pub use bind::{bind_host, BindOptions};
pub use hosts::{list_hosts, HostsOptions};
pub use validate::{validate_host, ValidateOptions};

/// Build the default validation stack for CLI use: TOML host list, TCP
/// registry, ssh/local probing, console reporting, inline callbacks.
pub(crate) fn default_validator(color: bool) -> Result<HostValidator> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let list = HostList::load_merged(&cwd)?;

    let registry = Arc::new(TcpHostRegistry::new(list));
    let binding = Arc::new(ToolchainBinding::new(Arc::new(ProbeEnumerator::new())));
    let reporter = Arc::new(ConsoleReporter::new(color));

    Ok(HostValidator::new(
        registry,
        binding,
        reporter,
        Arc::new(DirectContext),
    ))
}
