//! Shared test fixtures.

use crate::core::toolchain::{DebuggerTool, ToolchainEntry, ToolchainSet};

/// A host list TOML with one remote host and a display name.
pub fn sample_hosts_toml() -> &'static str {
    r#"[[hosts]]
key = "alice@build-server:22"
display_name = "build farm"

[[hosts]]
key = "10.0.0.5:2222"
"#
}

/// A debug configuration TOML with no host binding.
pub fn minimal_config_toml(name: &str, engine: &str) -> String {
    format!("name = \"{}\"\nengine = \"{}\"\n", name, engine)
}

/// A GNU entry with gcc/g++ and gdb attached.
pub fn gnu_entry() -> ToolchainEntry {
    ToolchainEntry::new("GNU")
        .with_c_compiler("/usr/bin/gcc")
        .with_cxx_compiler("/usr/bin/g++")
        .with_debugger(DebuggerTool::new("gdb").with_version("13.1"))
}

/// An LLVM entry with clang and lldb attached.
pub fn llvm_entry() -> ToolchainEntry {
    ToolchainEntry::new("LLVM")
        .with_c_compiler("/usr/bin/clang")
        .with_debugger(DebuggerTool::new("lldb").with_version("17.0.2"))
}

/// A two-entry toolchain set: GNU then LLVM.
pub fn gnu_llvm_set() -> ToolchainSet {
    ToolchainSet::from_entries(vec![gnu_entry(), llvm_entry()])
}
