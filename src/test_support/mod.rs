//! Test utilities and mocks for Berth unit tests.
//!
//! This module provides mock implementations for the interfaces that are
//! hard to exercise in isolation: the host registry, the toolchain
//! enumerator, the failure reporter, and the probe command runner.
//!
//! # Example
//!
//! ```rust,ignore
//! use berth::test_support::{EventLog, MockHostRegistry, MockEnumerator};
//!
//! #[test]
//! fn test_example() {
//!     let events = EventLog::default();
//!     let mut registry = MockHostRegistry::new(events.clone());
//!     registry.set_reachable("build-server");
//!
//!     // Use mocks with a HostValidator...
//! }
//! ```

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use anyhow::{anyhow, bail, Result};

pub use fixtures::*;

use crate::core::host::{ConnectionDescriptor, ConnectionState, HostKeyError};
use crate::core::toolchain::{DebuggerTool, PlatformInfo, ToolchainEntry};
use crate::discovery::{CommandRunner, DiscoveryError, ToolchainEnumerator};
use crate::registry::HostRegistry;
use crate::validator::ValidationReporter;

/// A shared, ordered log of events from mocks and continuations.
///
/// Cloning shares the underlying log, so one instance can be threaded
/// through a registry, an enumerator, and test callbacks to assert on the
/// interleaving.
#[derive(Clone, Default)]
pub struct EventLog(std::sync::Arc<Mutex<Vec<String>>>);

impl EventLog {
    /// Append an event.
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    /// Copy of all events in order.
    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Mock host registry with scripted reachability.
///
/// Hosts marked reachable come `Online`; everything else `Failed`. Every
/// `bring_online` is recorded as `connect:<host>` in the event log.
pub struct MockHostRegistry {
    reachable: HashSet<String>,
    keys: Vec<String>,
    states: RwLock<HashMap<ConnectionDescriptor, ConnectionState>>,
    connects: AtomicUsize,
    events: EventLog,
}

impl MockHostRegistry {
    /// Create a registry that can reach nothing.
    pub fn new(events: EventLog) -> Self {
        MockHostRegistry {
            reachable: HashSet::new(),
            keys: vec!["localhost".to_string(), "alice@remote1:22".to_string()],
            states: RwLock::new(HashMap::new()),
            connects: AtomicUsize::new(0),
            events,
        }
    }

    /// Mark a host name as reachable.
    pub fn set_reachable(&mut self, host: &str) {
        self.reachable.insert(host.to_string());
    }

    /// Number of `bring_online` calls so far.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl HostRegistry for MockHostRegistry {
    fn descriptor_for(&self, key: &str) -> Result<ConnectionDescriptor, HostKeyError> {
        ConnectionDescriptor::parse(key)
    }

    fn bring_online(&self, desc: &ConnectionDescriptor) -> ConnectionState {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.events.push(format!("connect:{}", desc.host));

        let state = if self.reachable.contains(&desc.host) {
            ConnectionState::Online
        } else {
            ConnectionState::Failed
        };
        self.states.write().unwrap().insert(desc.clone(), state);
        state
    }

    fn state(&self, desc: &ConnectionDescriptor) -> ConnectionState {
        self.states
            .read()
            .unwrap()
            .get(desc)
            .copied()
            .unwrap_or(ConnectionState::Offline)
    }

    fn known_host_keys(&self) -> Vec<String> {
        self.keys.clone()
    }
}

/// Mock toolchain enumerator with scripted results and probe counters.
pub struct MockEnumerator {
    compilers: Mutex<Vec<ToolchainEntry>>,
    debuggers: Mutex<Vec<DebuggerTool>>,
    platform: Mutex<PlatformInfo>,
    fail: AtomicBool,
    compiler_probes: AtomicUsize,
    debugger_probes: AtomicUsize,
    platform_probes: AtomicUsize,
    events: Mutex<Option<EventLog>>,
}

impl Default for MockEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnumerator {
    /// Create an enumerator that discovers nothing.
    pub fn new() -> Self {
        MockEnumerator {
            compilers: Mutex::new(Vec::new()),
            debuggers: Mutex::new(Vec::new()),
            platform: Mutex::new(PlatformInfo::new("Linux", "x86_64")),
            fail: AtomicBool::new(false),
            compiler_probes: AtomicUsize::new(0),
            debugger_probes: AtomicUsize::new(0),
            platform_probes: AtomicUsize::new(0),
            events: Mutex::new(None),
        }
    }

    /// Script the discovered compiler sets.
    pub fn with_compilers(self, entries: Vec<ToolchainEntry>) -> Self {
        *self.compilers.lock().unwrap() = entries;
        self
    }

    /// Script the discovered debuggers.
    pub fn with_debuggers(self, tools: Vec<DebuggerTool>) -> Self {
        *self.debuggers.lock().unwrap() = tools;
        self
    }

    /// Script the platform info.
    pub fn with_platform(self, platform: PlatformInfo) -> Self {
        *self.platform.lock().unwrap() = platform;
        self
    }

    /// Record discovery events into the given log.
    pub fn with_events(self, events: EventLog) -> Self {
        *self.events.lock().unwrap() = Some(events);
        self
    }

    /// Replace the scripted compiler sets.
    pub fn set_compilers(&self, entries: Vec<ToolchainEntry>) {
        *self.compilers.lock().unwrap() = entries;
    }

    /// Replace the scripted debuggers.
    pub fn set_debuggers(&self, tools: Vec<DebuggerTool>) {
        *self.debuggers.lock().unwrap() = tools;
    }

    /// Make every discovery call fail from now on.
    pub fn fail_discovery(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Number of compiler discovery calls.
    pub fn compiler_probes(&self) -> usize {
        self.compiler_probes.load(Ordering::SeqCst)
    }

    /// Number of debugger discovery calls.
    pub fn debugger_probes(&self) -> usize {
        self.debugger_probes.load(Ordering::SeqCst)
    }

    /// Number of platform discovery calls.
    pub fn platform_probes(&self) -> usize {
        self.platform_probes.load(Ordering::SeqCst)
    }

    fn check_failure(&self, desc: &ConnectionDescriptor) -> Result<(), DiscoveryError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(DiscoveryError::Probe {
                host: desc.clone(),
                tool: "scripted".to_string(),
                source: anyhow!("scripted discovery failure"),
            })
        } else {
            Ok(())
        }
    }

    fn log(&self, event: String) {
        if let Some(events) = self.events.lock().unwrap().as_ref() {
            events.push(event);
        }
    }
}

impl ToolchainEnumerator for MockEnumerator {
    fn discover_compilers(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<Vec<ToolchainEntry>, DiscoveryError> {
        self.compiler_probes.fetch_add(1, Ordering::SeqCst);
        self.log(format!("discover:{}", desc.host));
        self.check_failure(desc)?;
        Ok(self.compilers.lock().unwrap().clone())
    }

    fn discover_debuggers(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<Vec<DebuggerTool>, DiscoveryError> {
        self.debugger_probes.fetch_add(1, Ordering::SeqCst);
        self.check_failure(desc)?;
        Ok(self.debuggers.lock().unwrap().clone())
    }

    fn platform_info_for(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<PlatformInfo, DiscoveryError> {
        self.platform_probes.fetch_add(1, Ordering::SeqCst);
        self.check_failure(desc)?;
        Ok(self.platform.lock().unwrap().clone())
    }
}

/// Recording reporter: counts and captures every report.
#[derive(Default)]
pub struct RecordingReporter {
    connect: Mutex<Vec<ConnectionDescriptor>>,
    continuation: Mutex<Vec<ConnectionDescriptor>>,
}

impl RecordingReporter {
    /// Descriptors reported as connect failures, in order.
    pub fn connect_failures(&self) -> Vec<ConnectionDescriptor> {
        self.connect.lock().unwrap().clone()
    }

    /// Number of connect-failure reports.
    pub fn connect_failure_count(&self) -> usize {
        self.connect.lock().unwrap().len()
    }

    /// Number of continuation-failure reports.
    pub fn continuation_failure_count(&self) -> usize {
        self.continuation.lock().unwrap().len()
    }
}

impl ValidationReporter for RecordingReporter {
    fn report_connect_failure(&self, desc: &ConnectionDescriptor) {
        self.connect.lock().unwrap().push(desc.clone());
    }

    fn report_continuation_failure(&self, desc: &ConnectionDescriptor) {
        self.continuation.lock().unwrap().push(desc.clone());
    }
}

/// Scripted probe runner for discovery tests.
///
/// Tools added with [`add_tool`](Self::add_tool) are locatable and answer
/// any invocation with their scripted output; everything else is absent.
/// An `unreachable` runner fails every call, like ssh to a dead host.
#[derive(Default)]
pub struct ScriptedRunner {
    tools: HashMap<String, (String, String)>,
    unreachable: bool,
}

impl ScriptedRunner {
    /// Create a runner with no tools installed.
    pub fn new() -> Self {
        ScriptedRunner::default()
    }

    /// Create a runner whose transport is down.
    pub fn unreachable() -> Self {
        ScriptedRunner {
            tools: HashMap::new(),
            unreachable: true,
        }
    }

    /// Install a tool with a path and version output.
    pub fn add_tool(&mut self, name: &str, path: &str, version_output: &str) {
        self.tools
            .insert(name.to_string(), (path.to_string(), version_output.to_string()));
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, _args: &[&str]) -> Result<String> {
        if self.unreachable {
            bail!("scripted transport failure");
        }
        match self.tools.get(program) {
            Some((_, output)) => Ok(output.clone()),
            None => bail!("`{}` is not installed", program),
        }
    }

    fn locate(&self, program: &str) -> Result<Option<String>> {
        if self.unreachable {
            bail!("scripted transport failure");
        }
        Ok(self.tools.get(program).map(|(path, _)| path.clone()))
    }
}
