//! The `update-all` command: fetch every mirror under the base directory.
//!
//! Mirrors are fetched in parallel with rayon; per-mirror failures are
//! isolated and reported individually, and the overall exit status is
//! non-zero when any mirror failed.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::ProgressBar;
use rayon::prelude::*;

use git_mirror::output::{tag, OutputConfig};
use git_mirror::{git, inventory};

/// Fetch updates for all mirrors under the base directory
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Base directory for mirrors
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}

/// Execute the `update-all` command.
pub fn execute(args: UpdateArgs, output: &OutputConfig) -> Result<()> {
    let base_dir = super::resolve_base_dir(args.base_dir)?;

    let mut mirrors: Vec<PathBuf> = inventory::scan(&base_dir).collect();
    mirrors.sort();

    if mirrors.is_empty() {
        println!("No mirrors found under {}", base_dir.display());
        inventory::record_sync_time(&base_dir)?;
        return Ok(());
    }

    let bar = ProgressBar::new(mirrors.len() as u64);
    let results: Vec<(PathBuf, Option<String>)> = mirrors
        .par_iter()
        .map(|repo| {
            let result = git::fetch_mirror(repo);
            bar.inc(1);
            (repo.clone(), result.err().map(|e| e.to_string()))
        })
        .collect();
    bar.finish_and_clear();

    let mut failed = 0;
    for (repo, error) in &results {
        match error {
            Some(error) => {
                failed += 1;
                println!(
                    "{} {} :: {}",
                    tag(output, "[FAIL]", false),
                    repo.display(),
                    error
                );
            }
            None => println!("{}   {}", tag(output, "[OK]", true), repo.display()),
        }
    }

    inventory::record_sync_time(&base_dir)?;

    if failed > 0 {
        anyhow::bail!("{} of {} mirrors failed to update", failed, results.len());
    }
    Ok(())
}
