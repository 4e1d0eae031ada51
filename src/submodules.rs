//! Submodule mirroring helpers.
//!
//! A bare mirror has no worktree, so the submodule list is read from the
//! `.gitmodules` blob at HEAD via `git config --blob`.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::git::{ensure_mirror, run_git};

/// Return submodule URLs defined in the repository's `.gitmodules` at HEAD.
///
/// A repository without submodules (or without any readable `.gitmodules`
/// blob) yields an empty list rather than an error.
pub fn submodule_urls(repo_dir: &Path) -> Vec<String> {
    let git_dir = repo_dir.display().to_string();
    let listing = run_git(
        &[
            "--git-dir",
            &git_dir,
            "config",
            "--blob",
            "HEAD:.gitmodules",
            "--get-regexp",
            r"submodule\..*\.url",
        ],
        None,
    );

    let stdout = match listing {
        Ok(stdout) => stdout,
        Err(err) => {
            debug!("no submodules in {}: {}", repo_dir.display(), err);
            return Vec::new();
        }
    };

    stdout
        .lines()
        .filter_map(|line| line.trim().split_once(char::is_whitespace))
        .map(|(_, url)| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

/// Mirror all submodules of `repo_dir` under `base_dir`, recursively.
///
/// Returns the mirrored submodule paths, parents before their nested
/// submodules.
pub fn mirror_submodules(repo_dir: &Path, base_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut mirrored = Vec::new();
    for url in submodule_urls(repo_dir) {
        let sub_repo = ensure_mirror(&url, base_dir)?;
        mirrored.push(sub_repo.clone());
        mirrored.extend(mirror_submodules(&sub_repo, base_dir)?);
    }
    Ok(mirrored)
}
