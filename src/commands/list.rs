//! The `list` command: print detected mirror repositories.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;

use git_mirror::inventory;

/// List detected mirror repositories
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Base directory for mirrors
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Only list mirrors whose path matches a glob pattern
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Print only the number of mirrors
    #[arg(long)]
    pub count: bool,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs) -> Result<()> {
    let base_dir = super::resolve_base_dir(args.base_dir)?;

    let mut mirrors: Vec<PathBuf> = inventory::scan(&base_dir).collect();
    mirrors.sort();

    if let Some(pattern) = &args.pattern {
        let pattern = glob::Pattern::new(pattern)
            .map_err(|e| anyhow!("Invalid glob pattern {}: {}", pattern, e))?;
        mirrors.retain(|mirror| pattern.matches(&mirror.display().to_string()));
    }

    if args.count {
        println!("{}", mirrors.len());
        return Ok(());
    }
    for mirror in &mirrors {
        println!("{}", mirror.display());
    }
    Ok(())
}
