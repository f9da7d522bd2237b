//! `berth bind` command

use anyhow::{bail, Result};

use crate::cli::BindArgs;
use berth::ops::{bind_host, BindOptions};
use berth::EngineKind;

pub fn execute(args: BindArgs, color: bool) -> Result<()> {
    let engine = match args.engine.as_str() {
        "gdb" => EngineKind::Gdb,
        "dbx" => EngineKind::Dbx,
        "lldb" => EngineKind::Lldb,
        other => bail!("unknown debugger engine `{}`", other),
    };

    bind_host(&args.config, &args.host, engine, &BindOptions { color })
}
