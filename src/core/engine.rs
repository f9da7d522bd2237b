//! Debugger engine matching.
//!
//! Debug sessions are driven by an engine family (gdb, dbx, lldb). A host's
//! compiler sets each carry at most one debugger tool; matching picks the
//! first set whose debugger belongs to the desired family. No match is not
//! an error - callers fall back to whatever binding they already have.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::toolchain::{ToolchainEntry, ToolchainSet};

/// A debugger engine family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Gdb,
    Dbx,
    Lldb,
}

impl EngineKind {
    /// Engine name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Gdb => "gdb",
            EngineKind::Dbx => "dbx",
            EngineKind::Lldb => "lldb",
        }
    }

    /// Map a debugger tool name to its engine family.
    ///
    /// The table is fixed; unrecognized tool names map to `None`.
    pub fn from_tool_name(name: &str) -> Option<EngineKind> {
        match name {
            "gdb" => Some(EngineKind::Gdb),
            "dbx" => Some(EngineKind::Dbx),
            "lldb" => Some(EngineKind::Lldb),
            _ => None,
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The engine family of an entry's debugger tool, if it has a recognized one.
pub fn debugger_engine_of(entry: &ToolchainEntry) -> Option<EngineKind> {
    entry
        .debugger
        .as_ref()
        .and_then(|tool| EngineKind::from_tool_name(&tool.name))
}

/// Select the first entry whose debugger matches the desired engine.
///
/// Scans in set order; the earlier of two matching entries wins. Returns
/// `None` when nothing matches, leaving the caller's current binding alone.
pub fn select_for_engine(set: &ToolchainSet, desired: EngineKind) -> Option<&ToolchainEntry> {
    set.iter().find(|entry| debugger_engine_of(entry) == Some(desired))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::toolchain::DebuggerTool;

    fn entry(name: &str, debugger: Option<&str>) -> ToolchainEntry {
        let mut e = ToolchainEntry::new(name);
        if let Some(tool) = debugger {
            e = e.with_debugger(DebuggerTool::new(tool));
        }
        e
    }

    #[test]
    fn test_engine_table() {
        assert_eq!(EngineKind::from_tool_name("gdb"), Some(EngineKind::Gdb));
        assert_eq!(EngineKind::from_tool_name("dbx"), Some(EngineKind::Dbx));
        assert_eq!(EngineKind::from_tool_name("lldb"), Some(EngineKind::Lldb));
        assert_eq!(EngineKind::from_tool_name("windbg"), None);
        assert_eq!(EngineKind::from_tool_name(""), None);
    }

    #[test]
    fn test_debugger_engine_of() {
        assert_eq!(
            debugger_engine_of(&entry("GNU", Some("gdb"))),
            Some(EngineKind::Gdb)
        );
        assert_eq!(debugger_engine_of(&entry("GNU", None)), None);
        assert_eq!(debugger_engine_of(&entry("Odd", Some("windbg"))), None);
    }

    #[test]
    fn test_select_for_engine_first_match_wins() {
        let set = ToolchainSet::from_entries(vec![
            entry("gcc-toolset", Some("gdb")),
            entry("gdb-toolset", Some("gdb")),
        ]);

        // Two entries match Gdb; the earlier one by set order is selected.
        let selected = select_for_engine(&set, EngineKind::Gdb).unwrap();
        assert_eq!(selected.name, "gcc-toolset");
    }

    #[test]
    fn test_select_for_engine_scans_in_order() {
        let set = ToolchainSet::from_entries(vec![
            entry("gcc-toolset", Some("gdb")),
            entry("studio", Some("dbx")),
        ]);

        let selected = select_for_engine(&set, EngineKind::Dbx).unwrap();
        assert_eq!(selected.name, "studio");
    }

    #[test]
    fn test_select_for_engine_no_match() {
        let set = ToolchainSet::from_entries(vec![
            entry("gcc-toolset", Some("gdb")),
            entry("bare", None),
        ]);

        assert!(select_for_engine(&set, EngineKind::Lldb).is_none());
    }

    #[test]
    fn test_select_across_standard_set() {
        let set = crate::test_support::gnu_llvm_set();

        assert_eq!(
            select_for_engine(&set, EngineKind::Gdb).unwrap().name,
            "GNU"
        );
        assert_eq!(
            select_for_engine(&set, EngineKind::Lldb).unwrap().name,
            "LLVM"
        );
        assert!(select_for_engine(&set, EngineKind::Dbx).is_none());
    }
}
