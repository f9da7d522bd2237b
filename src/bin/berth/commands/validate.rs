//! `berth validate` command

use anyhow::Result;

use crate::cli::ValidateArgs;
use berth::ops::{validate_host, ValidateOptions};

pub fn execute(args: ValidateArgs, color: bool) -> Result<()> {
    validate_host(&args.host, &ValidateOptions { color })
}
