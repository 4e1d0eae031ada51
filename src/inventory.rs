//! Mirror inventory: discovery of on-disk mirrors and the sync-time ledger.
//!
//! A directory counts as a mirror when its name ends in `.git` and it
//! contains `config` and `HEAD` files. This is a shallow presence check;
//! the file contents are never validated and callers may rely on that
//! leniency.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::identity::{RepoId, MIRROR_SUFFIX};

/// Marker file in the base directory recording the last successful bulk sync.
pub const SYNC_MARKER: &str = ".last_sync";

/// Heuristic mirror-directory check: `.git`-suffixed directory containing
/// the typical bare-repository files.
pub fn is_mirror_dir(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(MIRROR_SUFFIX))
        && path.join("config").exists()
        && path.join("HEAD").exists()
}

/// Yield all mirror directories under `base_dir`, recursively, in
/// filesystem traversal order. A missing base directory yields nothing.
///
/// Callers that need deterministic downstream behavior must materialize
/// and sort the results.
pub fn scan(base_dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(base_dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_mirror_dir(entry.path()))
        .map(|entry| entry.into_path())
}

/// Inverse of [`RepoId::mirror_dir`]: map an on-disk mirror back to its
/// identity.
///
/// The first path component relative to `base_dir` is the host, the rest
/// are the repository path segments. A mirror sitting directly under the
/// base directory (or outside it) does not follow the layout and fails with
/// [`Error::MirrorLayout`]; bulk callers report such entries individually
/// instead of aborting.
pub fn identity_for(base_dir: &Path, mirror_dir: &Path) -> Result<RepoId> {
    let layout_error = || Error::MirrorLayout {
        path: mirror_dir.display().to_string(),
    };

    let rel = mirror_dir.strip_prefix(base_dir).map_err(|_| layout_error())?;
    let mut components: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if components.len() < 2 {
        return Err(layout_error());
    }

    let host = components.remove(0);
    let last = components.last_mut().unwrap();
    if let Some(stripped) = last.strip_suffix(MIRROR_SUFFIX) {
        *last = stripped.to_string();
    }
    if last.is_empty() {
        return Err(layout_error());
    }
    Ok(RepoId::from_parts(host, components))
}

/// Record the current UTC time in the base directory's sync marker.
pub fn record_sync_time(base_dir: &Path) -> Result<()> {
    fs::create_dir_all(base_dir)?;
    let stamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f");
    fs::write(base_dir.join(SYNC_MARKER), format!("{}\n", stamp))?;
    Ok(())
}

/// Read the last recorded sync time, if any. The value is surfaced as an
/// opaque string.
pub fn read_sync_time(base_dir: &Path) -> Option<String> {
    fs::read_to_string(base_dir.join(SYNC_MARKER))
        .ok()
        .map(|s| s.trim().to_string())
}
