//! Tool probing over a command runner.
//!
//! Probing asks a host which compilers and debuggers it has by locating
//! candidate executables and running their version commands. The same probe
//! logic runs locally or through `ssh`, depending on the descriptor.

use std::sync::LazyLock;

use anyhow::{anyhow, bail, Result};
use regex::Regex;

use crate::core::host::ConnectionDescriptor;
use crate::core::toolchain::{DebuggerTool, PlatformInfo, ToolchainEntry};
use crate::discovery::{DiscoveryError, ToolchainEnumerator};
use crate::util::process::{find_executable, ProcessBuilder};

/// Executes probe commands on some machine.
///
/// `locate` distinguishes "tool not present" (`Ok(None)`) from "could not
/// ask" (`Err`); the latter fails the whole discovery.
pub trait CommandRunner: Send + Sync {
    /// Run a program with arguments, returning captured stdout on success.
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;

    /// Locate an executable on the probed machine.
    fn locate(&self, program: &str) -> Result<Option<String>>;
}

/// Runs probes on the local machine.
pub struct LocalRunner;

impl CommandRunner for LocalRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = ProcessBuilder::new(program).args(args).exec_and_check()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn locate(&self, program: &str) -> Result<Option<String>> {
        Ok(find_executable(program).map(|p| p.display().to_string()))
    }
}

/// Runs probes on a remote machine through `ssh`.
///
/// Uses `BatchMode` so an interactive password prompt fails the probe
/// instead of hanging it on a prompt nobody will answer.
pub struct SshRunner {
    target: String,
    port: u16,
}

impl SshRunner {
    /// Create a runner for the given descriptor.
    pub fn new(desc: &ConnectionDescriptor) -> Self {
        SshRunner {
            target: desc.display_name(),
            port: desc.port,
        }
    }

    fn ssh(&self, remote_command: &[&str]) -> Result<std::process::Output> {
        let port = self.port.to_string();
        ProcessBuilder::new("ssh")
            .args(["-o", "BatchMode=yes", "-p", port.as_str(), self.target.as_str()])
            .args(remote_command)
            .exec()
    }
}

impl CommandRunner for SshRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let mut command = vec![program];
        command.extend_from_slice(args);

        let output = self.ssh(&command)?;
        if !output.status.success() {
            bail!(
                "`{}` failed on {}: {}",
                program,
                self.target,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn locate(&self, program: &str) -> Result<Option<String>> {
        let output = self.ssh(&["command", "-v", program])?;

        // ssh reserves 255 for transport/authentication failures; any other
        // nonzero status means the shell ran and the tool is absent.
        match output.status.code() {
            Some(0) => {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok((!path.is_empty()).then_some(path))
            }
            Some(255) | None => Err(anyhow!(
                "ssh to {} failed: {}",
                self.target,
                String::from_utf8_lossy(&output.stderr).trim()
            )),
            Some(_) => Ok(None),
        }
    }
}

/// C compiler candidates probed in order: (cc, cxx).
const COMPILER_CANDIDATES: &[(&str, &str)] = &[("gcc", "g++"), ("clang", "clang++"), ("cc", "CC")];

/// Debugger candidates probed in order: (tool, version flag).
const DEBUGGER_CANDIDATES: &[(&str, &str)] = &[("gdb", "--version"), ("lldb", "--version"), ("dbx", "-V")];

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+(?:\.\d+)*)").unwrap());

/// Extract a dotted version number from probe output.
fn parse_version(output: &str) -> Option<String> {
    VERSION_RE
        .captures(output)
        .map(|caps| caps[1].to_string())
}

/// Classify a compiler into a set name from its version output.
fn classify_compiler(tool: &str, version_output: &str) -> Option<&'static str> {
    let lower = version_output.to_lowercase();
    if lower.contains("clang") {
        Some("LLVM")
    } else if lower.contains("free software foundation") || lower.contains("gcc") {
        Some("GNU")
    } else if lower.contains("studio") || lower.contains("sun c") {
        Some("OracleDeveloperStudio")
    } else {
        // Version output is unrecognizable; trust the well-known tool names.
        match tool {
            "gcc" => Some("GNU"),
            "clang" => Some("LLVM"),
            _ => None,
        }
    }
}

/// Probe the compiler sets visible to a runner.
pub(crate) fn probe_compilers(runner: &dyn CommandRunner) -> Result<Vec<ToolchainEntry>> {
    let mut entries: Vec<ToolchainEntry> = Vec::new();

    for &(cc, cxx) in COMPILER_CANDIDATES {
        let Some(cc_path) = runner.locate(cc)? else {
            continue;
        };

        let version_output = match runner.run(cc, &["--version"]) {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("`{} --version` failed, skipping: {e:#}", cc);
                continue;
            }
        };

        let Some(family) = classify_compiler(cc, &version_output) else {
            tracing::debug!("cannot classify `{}`, skipping", cc);
            continue;
        };

        if entries.iter().any(|e| e.name == family) {
            continue;
        }

        let mut entry = ToolchainEntry::new(family).with_c_compiler(&cc_path);
        if let Some(cxx_path) = runner.locate(cxx)? {
            entry = entry.with_cxx_compiler(cxx_path);
        }

        tracing::debug!(set = family, cc = %cc_path, "found compiler set");
        entries.push(entry);
    }

    Ok(entries)
}

/// Probe the debugger tools visible to a runner.
pub(crate) fn probe_debuggers(runner: &dyn CommandRunner) -> Result<Vec<DebuggerTool>> {
    let mut tools = Vec::new();

    for &(name, version_flag) in DEBUGGER_CANDIDATES {
        let Some(path) = runner.locate(name)? else {
            continue;
        };

        let mut tool = DebuggerTool::new(name).with_path(&path);
        match runner.run(name, &[version_flag]) {
            Ok(output) => {
                if let Some(version) = parse_version(&output) {
                    tool = tool.with_version(version);
                }
            }
            Err(e) => tracing::debug!("`{} {}` failed: {e:#}", name, version_flag),
        }

        tracing::debug!(debugger = name, path = %path, "found debugger");
        tools.push(tool);
    }

    Ok(tools)
}

/// Probe platform metadata with `uname`.
pub(crate) fn probe_platform(runner: &dyn CommandRunner) -> Result<PlatformInfo> {
    let os = runner.run("uname", &["-s"])?.trim().to_string();
    let arch = runner.run("uname", &["-m"])?.trim().to_string();
    Ok(PlatformInfo::new(os, arch))
}

/// The default enumerator: probes hosts with `which` + version commands,
/// locally for loopback descriptors and over `ssh` otherwise.
#[derive(Default)]
pub struct ProbeEnumerator;

impl ProbeEnumerator {
    /// Create a probe enumerator.
    pub fn new() -> Self {
        ProbeEnumerator
    }

    fn runner_for(&self, desc: &ConnectionDescriptor) -> Box<dyn CommandRunner> {
        if is_loopback(&desc.host) {
            Box::new(LocalRunner)
        } else {
            Box::new(SshRunner::new(desc))
        }
    }
}

fn is_loopback(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

impl ToolchainEnumerator for ProbeEnumerator {
    fn discover_compilers(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<Vec<ToolchainEntry>, DiscoveryError> {
        probe_compilers(self.runner_for(desc).as_ref()).map_err(|source| DiscoveryError::Probe {
            host: desc.clone(),
            tool: "compilers".to_string(),
            source,
        })
    }

    fn discover_debuggers(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<Vec<DebuggerTool>, DiscoveryError> {
        probe_debuggers(self.runner_for(desc).as_ref()).map_err(|source| DiscoveryError::Probe {
            host: desc.clone(),
            tool: "debuggers".to_string(),
            source,
        })
    }

    fn platform_info_for(
        &self,
        desc: &ConnectionDescriptor,
    ) -> Result<PlatformInfo, DiscoveryError> {
        match probe_platform(self.runner_for(desc).as_ref()) {
            Ok(info) => Ok(info),
            // Local machines without uname (Windows) still have a platform.
            Err(_) if is_loopback(&desc.host) => Ok(PlatformInfo::new(
                std::env::consts::OS,
                std::env::consts::ARCH,
            )),
            Err(source) => Err(DiscoveryError::Platform {
                host: desc.clone(),
                source,
            }),
        }
    }
}
