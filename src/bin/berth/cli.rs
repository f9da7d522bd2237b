//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Berth - remote build/debug host validation for C/C++ toolchains
#[derive(Parser)]
#[command(name = "berth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the known build/debug hosts
    Hosts(HostsArgs),

    /// Validate a host: connect and discover its toolchain
    Validate(ValidateArgs),

    /// Bind a debug configuration to a host
    Bind(BindArgs),
}

#[derive(Args)]
pub struct HostsArgs {
    /// Probe each remote host's reachability while listing
    #[arg(long)]
    pub probe: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Host key (`host`, `host:port`, or `user@host:port`), or `localhost`
    pub host: String,
}

#[derive(Args)]
pub struct BindArgs {
    /// Path to the debug configuration file
    pub config: PathBuf,

    /// Host key to bind the configuration to
    #[arg(long)]
    pub host: String,

    /// Desired debugger engine
    #[arg(long, value_parser = ["gdb", "dbx", "lldb"])]
    pub engine: String,
}
