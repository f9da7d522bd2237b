//! Implementation of `berth validate`.

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::host::{is_local, ConnectionDescriptor};
use crate::ops::default_validator;
use crate::util::diagnostic::emit;

/// Options for the validate command.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Use colors in output
    pub color: bool,
}

/// Validate a host synchronously and print what was discovered.
pub fn validate_host(key: &str, opts: &ValidateOptions) -> Result<()> {
    let validator = default_validator(opts.color)?;

    if is_local(key) {
        eprintln!("   Validated localhost (no connection needed)");
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Validating {}", key));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let outcome = validator.validate_now(key);
    spinner.finish_and_clear();

    if let Err(e) = outcome {
        emit(&e.to_diagnostic(), opts.color);
        bail!("host `{}` failed validation", key);
    }

    // validate_now decoded this same key successfully.
    let desc = ConnectionDescriptor::parse(key)?;
    let toolchains = validator.toolchains();

    match toolchains.platform_info(&desc) {
        Ok(platform) => {
            eprintln!("   Validated {} ({} {})", desc, platform.os, platform.arch)
        }
        Err(_) => eprintln!("   Validated {}", desc),
    }

    let Some(set) = toolchains.cached(&desc) else {
        return Ok(());
    };

    if set.is_empty() {
        eprintln!("     (no compiler sets found)");
    }
    for entry in set.iter() {
        let mut line = format!("     {:<24}", entry.name);
        if let Some(cc) = &entry.c_compiler {
            line.push_str(&format!(" cc={}", cc.display()));
        }
        if let Some(cxx) = &entry.cxx_compiler {
            line.push_str(&format!(" cxx={}", cxx.display()));
        }
        if let Some(debugger) = &entry.debugger {
            line.push_str(&format!(" {}", debugger.name));
            if let Some(version) = &debugger.version {
                line.push_str(&format!(" {}", version));
            }
        }
        println!("{}", line);
    }

    Ok(())
}
