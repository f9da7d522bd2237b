//! `berth hosts` command

use anyhow::Result;

use crate::cli::HostsArgs;
use berth::ops::{list_hosts, HostsOptions};

pub fn execute(args: HostsArgs, _color: bool) -> Result<()> {
    list_hosts(&HostsOptions { probe: args.probe })
}
