//! Berth CLI - remote build/debug host validation for C/C++ toolchains

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("berth=debug")
    } else {
        EnvFilter::new("berth=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    let color = !cli.no_color;
    match cli.command {
        Commands::Hosts(args) => commands::hosts::execute(args, color),
        Commands::Validate(args) => commands::validate::execute(args, color),
        Commands::Bind(args) => commands::bind::execute(args, color),
    }
}
