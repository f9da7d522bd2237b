//! Core data structures for Berth.
//!
//! This module contains the foundational types used throughout Berth:
//! - Host identity (host keys, connection descriptors, connection state)
//! - Toolchain value types (compiler sets, debugger tools, platform info)
//! - Debugger engine families and matching
//! - Debug configurations

pub mod configuration;
pub mod engine;
pub mod host;
pub mod toolchain;

pub use configuration::DebugConfiguration;
pub use engine::EngineKind;
pub use host::{ConnectionDescriptor, ConnectionState, HostKeyError, LOCAL_HOST};
pub use toolchain::{DebuggerTool, PlatformInfo, ToolchainEntry, ToolchainSet};
