//! The `clone` command: mirror-clone or update a single repository.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use git_mirror::{git, submodules};

/// Mirror-clone or update a single repository URL
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Git URL (ssh shorthand, http(s)/ssh/git scheme, or local mirror path)
    pub url: String,

    /// Base directory for mirrors
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Also mirror submodules, recursively
    #[arg(long)]
    pub with_submodules: bool,
}

/// Execute the `clone` command. Prints the mirror path (and any mirrored
/// submodule paths) on success.
pub fn execute(args: CloneArgs) -> Result<()> {
    let base_dir = super::resolve_base_dir(args.base_dir)?;

    let target = git::ensure_mirror(&args.url, &base_dir)?;
    println!("{}", target.display());

    if args.with_submodules {
        for sub_repo in submodules::mirror_submodules(&target, &base_dir)? {
            println!("{}", sub_repo.display());
        }
    }
    Ok(())
}
