//! # CLI Command Implementations
//!
//! One module per subcommand of the `git-mirror` tool. Each module defines
//! an `Args` struct derived with `clap` and an `execute` function that
//! performs the command by calling into the `git_mirror` library.
//!
//! Shared flag-resolution helpers live here: the base directory falls back
//! to the nearest `.git-mirror.conf` above the working directory, and the
//! gitolite-admin coordinates fall back to stored settings.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use git_mirror::settings;

pub mod clone;
pub mod completions;
pub mod gitolite_add;
pub mod gitolite_sync;
pub mod init;
pub mod install_timer;
pub mod list;
pub mod status;
pub mod update;

/// Resolve the mirror base directory from the `--base-dir` flag or the
/// nearest settings file above the current directory.
pub(crate) fn resolve_base_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    let cwd = std::env::current_dir()?;
    settings::find_base_dir(&cwd).ok_or_else(|| {
        anyhow!(
            "no --base-dir given and no {} found in {} or above",
            settings::SETTINGS_FILENAME,
            cwd.display()
        )
    })
}

/// Resolve the gitolite-admin URL and checkout directory from flags,
/// stored settings, and defaults, in that order.
pub(crate) fn resolve_admin(
    base_dir: Option<&Path>,
    admin_url: Option<String>,
    admin_dir: Option<PathBuf>,
) -> Result<(String, PathBuf)> {
    let stored = |key: &str| -> Result<Option<String>> {
        match base_dir {
            Some(dir) => Ok(settings::get_value(dir, key)?),
            None => Ok(None),
        }
    };

    let admin_url = match admin_url {
        Some(url) => url,
        None => stored("admin_url")?.ok_or_else(|| {
            anyhow!("no --admin-url given and none stored; run `git-mirror init` first")
        })?,
    };

    let admin_dir = match admin_dir {
        Some(dir) => dir,
        None => match stored("admin_dir")? {
            Some(dir) => PathBuf::from(dir),
            None => dirs::cache_dir()
                .ok_or_else(|| anyhow!("could not determine a cache directory for the gitolite-admin checkout"))?
                .join("git-mirror")
                .join("gitolite-admin"),
        },
    };

    Ok((admin_url, admin_dir))
}
