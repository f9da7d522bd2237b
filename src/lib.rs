//! Berth - A remote build/debug host validation bridge for C/C++ toolchains
//!
//! This crate provides the core library functionality for Berth: resolving
//! host identities, bringing hosts online, discovering their compiler and
//! debugger sets, and serializing that work through a single validation
//! worker so the blocking parts never touch a presentation thread.

pub mod core;
pub mod discovery;
pub mod ops;
pub mod registry;
pub mod util;
pub mod validator;

/// Test utilities and mocks for Berth unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides mock implementations for the host registry,
/// the toolchain enumerator, and the failure reporter.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    configuration::DebugConfiguration, engine::EngineKind, host::ConnectionDescriptor,
    host::ConnectionState, host::HostKeyError, toolchain::PlatformInfo, toolchain::ToolchainEntry,
    toolchain::ToolchainSet,
};

pub use discovery::{ProbeEnumerator, ToolchainBinding, ToolchainEnumerator};
pub use registry::{HostList, HostRegistry, TcpHostRegistry};
pub use validator::{
    CallbackLoop, DirectContext, HostValidator, PresentationContext, ValidationError,
    ValidationReporter,
};
