//! Git subprocess wrappers for mirror maintenance.
//!
//! Uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::identity::RepoId;

/// Run a git command, returning captured stdout. A non-zero exit (or a
/// failure to spawn git at all) is an error carrying the trimmed stderr.
pub(crate) fn run_git(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut command = Command::new("git");
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    debug!("running: git {}", args.join(" "));

    let output = command.output().map_err(|e| Error::GitCommand {
        command: args.join(" "),
        stderr: e.to_string(),
    })?;
    if !output.status.success() {
        return Err(Error::GitCommand {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Ensure a repository is mirror-cloned under `base_dir` in the
/// `host/path.../repo.git` layout.
///
/// An existing mirror gets a `git remote update --prune`; a missing one is
/// created with `git clone --mirror`. Returns the mirror directory.
pub fn ensure_mirror(url: &str, base_dir: &Path) -> Result<PathBuf> {
    let rid = RepoId::resolve(url)?;
    let target = rid.mirror_dir(base_dir);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    if target.exists() {
        info!("updating existing mirror {}", target.display());
        fetch_mirror(&target)?;
    } else {
        info!("mirror-cloning {} into {}", url, target.display());
        clone_mirror(url, &target)?;
    }
    Ok(target)
}

/// Fetch updates for a single mirror repository.
pub fn fetch_mirror(repo_dir: &Path) -> Result<()> {
    run_git(&["remote", "update", "--prune"], Some(repo_dir))?;
    Ok(())
}

fn clone_mirror(url: &str, target: &Path) -> Result<()> {
    let output = Command::new("git")
        .args(["clone", "--mirror", url])
        .arg(target)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let message = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            format!(
                "Authentication failed. Make sure you have access to the repository.\n\
                For private repos, ensure you have:\n\
                - SSH key added to ssh-agent\n\
                - Git credentials configured\n\
                - Personal access token set up\n\
                Error: {}",
                stderr
            )
        } else {
            stderr.to_string()
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            message,
        });
    }

    Ok(())
}
