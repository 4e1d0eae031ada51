//! The `init` command: store default settings in the base directory.
//!
//! Values not supplied as flags are asked for interactively, so a plain
//! `git-mirror init` walks through the full setup while scripted callers
//! can pass everything on the command line.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dialoguer::Input;

use git_mirror::settings;

/// Store default settings in the base directory
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Base directory for mirrors (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// gitolite-admin repository URL
    #[arg(long, value_name = "URL")]
    pub admin_url: Option<String>,

    /// Local path for the gitolite-admin checkout
    #[arg(long, value_name = "DIR")]
    pub admin_dir: Option<PathBuf>,

    /// Default readers group or user list
    #[arg(long)]
    pub readers: Option<String>,

    /// Default path prefix inside gitolite
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Execute the `init` command.
pub fn execute(args: InitArgs) -> Result<()> {
    let base_dir = match args.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    fs::create_dir_all(&base_dir)?;

    let admin_url = prompt_or(args.admin_url, "gitolite-admin repository URL", None)?;

    let default_admin_dir = dirs::cache_dir()
        .map(|dir| dir.join("git-mirror").join("gitolite-admin"))
        .map(|dir| dir.display().to_string());
    let admin_dir = prompt_or(
        args.admin_dir.map(|d| d.display().to_string()),
        "Local path for the gitolite-admin checkout",
        default_admin_dir,
    )?;

    let readers = prompt_or(args.readers, "Default readers", Some("@all".to_string()))?;
    let prefix = prompt_or(
        args.prefix,
        "Gitolite path prefix",
        Some("mirrors".to_string()),
    )?;

    settings::set_value(&base_dir, "admin_url", &admin_url)?;
    settings::set_value(&base_dir, "admin_dir", &admin_dir)?;
    settings::set_value(&base_dir, "readers", &readers)?;
    settings::set_value(&base_dir, "prefix", &prefix)?;

    println!(
        "Settings written to {}",
        settings::settings_path(&base_dir).display()
    );
    Ok(())
}

fn prompt_or(flag: Option<String>, prompt: &str, default: Option<String>) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}
