//! The `install-timer` command: register a systemd user timer that keeps
//! the mirror tree and the gitolite config fresh.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use git_mirror::systemd;

/// Register a systemd user timer for periodic mirroring
#[derive(Args, Debug)]
pub struct InstallTimerArgs {
    /// Base directory for mirrors
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}

/// Execute the `install-timer` command.
pub fn execute(args: InstallTimerArgs) -> Result<()> {
    let base_dir = super::resolve_base_dir(args.base_dir)?;
    let (service, timer) = systemd::register_user_timer(&base_dir)?;
    println!("{}", service.display());
    println!("{}", timer.display());
    Ok(())
}
