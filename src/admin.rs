//! # Gitolite-admin checkout provider
//!
//! The reconciliation engine treats the version-controlled configuration as
//! an opaque read/replace pair; this module is the collaborator that backs
//! that contract with an actual gitolite-admin checkout.
//!
//! Strategy:
//! - Keep all mirror ACLs in `conf/mirrors.conf`, included from
//!   `conf/gitolite.conf`.
//! - Refresh the checkout before reading, commit and push after writing,
//!   so a single reconciliation pass holds the only live copy (the
//!   single-writer discipline the engine requires).

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::git::run_git;

/// Ensure a local clone of gitolite-admin exists at `admin_dir` and is
/// reset to the remote state (`origin/master` or `origin/main`, whichever
/// exists).
pub fn ensure_admin_repo(admin_url: &str, admin_dir: &Path) -> Result<()> {
    if !admin_dir.exists() {
        if let Some(parent) = admin_dir.parent() {
            fs::create_dir_all(parent)?;
        }
        let target = admin_dir.display().to_string();
        info!("cloning gitolite-admin from {}", admin_url);
        run_git(&["clone", admin_url, &target], None)?;
    }

    run_git(&["fetch", "--prune", "origin"], Some(admin_dir))?;
    // Try both master and main because the world is inconsistent
    for branch in ["master", "main"] {
        let origin_ref = format!("origin/{}", branch);
        if run_git(&["rev-parse", "--verify", &origin_ref], Some(admin_dir)).is_ok() {
            run_git(&["checkout", "-B", branch, &origin_ref], Some(admin_dir))?;
            break;
        }
    }
    Ok(())
}

/// Ensure `conf/gitolite.conf` includes the managed document, creating the
/// document with a marker comment when missing. Returns the document path.
pub fn ensure_include(admin_dir: &Path, include_file: &str) -> Result<PathBuf> {
    let conf_dir = admin_dir.join("conf");
    fs::create_dir_all(&conf_dir)?;
    let main_conf = conf_dir.join("gitolite.conf");
    let managed = conf_dir.join(include_file);

    if !main_conf.exists() {
        return Err(Error::AdminLayout {
            message: format!(
                "{} not found; is this a gitolite-admin checkout?",
                main_conf.display()
            ),
        });
    }

    let include_line = format!("include \"{}\"", include_file);
    let mut text = fs::read_to_string(&main_conf)?;
    if !text.contains(&include_line) {
        debug!("appending include of {} to gitolite.conf", include_file);
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&include_line);
        text.push('\n');
        fs::write(&main_conf, text)?;
    }

    if !managed.exists() {
        fs::write(&managed, "# Mirror ACLs managed by git-mirror\n")?;
    }
    Ok(managed)
}

/// Path of the managed document inside the checkout; errors when it has
/// not been created yet.
pub fn document_path(admin_dir: &Path, include_file: &str) -> Result<PathBuf> {
    let path = admin_dir.join("conf").join(include_file);
    if !path.exists() {
        return Err(Error::AdminLayout {
            message: format!("{} does not exist; run ensure_include first", path.display()),
        });
    }
    Ok(path)
}

/// Read the managed document's current text.
pub fn read_document(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Replace the managed document's text in one write.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)?;
    Ok(())
}

/// Commit any pending changes under `conf/` and push. No-op when the
/// working tree is clean.
pub fn commit_and_push(admin_dir: &Path, message: &str) -> Result<()> {
    run_git(&["add", "conf"], Some(admin_dir))?;

    let status = run_git(&["status", "--porcelain"], Some(admin_dir))?;
    if status.trim().is_empty() {
        debug!("nothing to commit in {}", admin_dir.display());
        return Ok(());
    }

    run_git(&["commit", "-m", message], Some(admin_dir))?;
    run_git(&["push", "origin", "HEAD"], Some(admin_dir))?;
    Ok(())
}
