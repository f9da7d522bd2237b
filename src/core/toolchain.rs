//! Toolchain value types - the compilers and debuggers discovered on a host.
//!
//! A [`ToolchainSet`] is owned by its host's connection descriptor and is
//! rebuilt wholesale on every discovery refresh; there is no incremental
//! diffing. An empty set is a valid (if unusual) discovery result.

use std::path::PathBuf;

/// A debugger executable found on a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebuggerTool {
    /// Tool name as probed (e.g. "gdb", "lldb", "dbx").
    pub name: String,
    /// Resolved executable path, when known.
    pub path: Option<PathBuf>,
    /// Version string extracted from `--version` output.
    pub version: Option<String>,
}

impl DebuggerTool {
    /// Create a debugger tool with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        DebuggerTool {
            name: name.into(),
            path: None,
            version: None,
        }
    }

    /// Set the executable path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// One compiler set on a host: a named compiler family plus its tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainEntry {
    /// Set name (e.g. "GNU", "LLVM", "OracleDeveloperStudio").
    pub name: String,
    /// C compiler path.
    pub c_compiler: Option<PathBuf>,
    /// C++ compiler path.
    pub cxx_compiler: Option<PathBuf>,
    /// Debugger bundled with this set, if any.
    pub debugger: Option<DebuggerTool>,
}

impl ToolchainEntry {
    /// Create an entry with just a set name.
    pub fn new(name: impl Into<String>) -> Self {
        ToolchainEntry {
            name: name.into(),
            c_compiler: None,
            cxx_compiler: None,
            debugger: None,
        }
    }

    /// Set the C compiler path.
    pub fn with_c_compiler(mut self, path: impl Into<PathBuf>) -> Self {
        self.c_compiler = Some(path.into());
        self
    }

    /// Set the C++ compiler path.
    pub fn with_cxx_compiler(mut self, path: impl Into<PathBuf>) -> Self {
        self.cxx_compiler = Some(path.into());
        self
    }

    /// Attach a debugger tool.
    pub fn with_debugger(mut self, debugger: DebuggerTool) -> Self {
        self.debugger = Some(debugger);
        self
    }
}

/// The ordered collection of compiler sets discovered on one host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainSet {
    entries: Vec<ToolchainEntry>,
}

impl ToolchainSet {
    /// Create an empty set.
    pub fn new() -> Self {
        ToolchainSet::default()
    }

    /// Build a set from entries, preserving order.
    pub fn from_entries(entries: Vec<ToolchainEntry>) -> Self {
        ToolchainSet { entries }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: ToolchainEntry) {
        self.entries.push(entry);
    }

    /// Iterate entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolchainEntry> {
        self.entries.iter()
    }

    /// Find an entry by set name.
    pub fn by_name(&self, name: &str) -> Option<&ToolchainEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Platform metadata for a host, cached after first discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Operating system name (e.g. "Linux", "SunOS", "Darwin").
    pub os: String,
    /// Machine architecture (e.g. "x86_64", "sparcv9").
    pub arch: String,
}

impl PlatformInfo {
    /// Create platform info from os/arch strings.
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        PlatformInfo {
            os: os.into(),
            arch: arch.into(),
        }
    }
}
