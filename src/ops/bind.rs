//! Implementation of `berth bind`.

use std::path::Path;

use anyhow::{bail, Result};

use crate::core::configuration::DebugConfiguration;
use crate::core::engine::EngineKind;
use crate::ops::default_validator;
use crate::util::diagnostic::{emit, Diagnostic};

/// Options for the bind command.
#[derive(Debug, Clone, Default)]
pub struct BindOptions {
    /// Use colors in output
    pub color: bool,
}

/// Bind a configuration file to a host, rebinding its compiler set to the
/// desired engine where possible, and save the result.
pub fn bind_host(
    config_path: &Path,
    host_key: &str,
    engine: EngineKind,
    opts: &BindOptions,
) -> Result<()> {
    let mut config = DebugConfiguration::load(config_path)?;
    let before = config.compiler_set.clone();

    let validator = default_validator(opts.color)?;
    if let Err(e) = validator.bind_configuration_to_host(&mut config, engine, host_key) {
        emit(&e.to_diagnostic(), opts.color);
        bail!("could not bind `{}` to `{}`", config.name, host_key);
    }

    config.save(config_path)?;
    eprintln!("       Bound {} to {}", config.name, config.host_label());

    match &config.compiler_set {
        Some(set) if before.as_deref() != Some(set.as_str()) => {
            eprintln!("    Compiler set rebound to {}", set);
        }
        Some(set) => {
            eprintln!("    Compiler set {} kept", set);
        }
        None => {
            let diag = Diagnostic::warning(format!(
                "no compiler set on `{}` matches engine `{}`",
                config.host_label(),
                engine
            ));
            emit(&diag, opts.color);
        }
    }

    Ok(())
}
