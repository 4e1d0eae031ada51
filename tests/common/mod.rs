//! Shared test utilities for the E2E tests.
//!
//! Provides the binary command constructor, fake-mirror fixtures, and
//! helpers that drive the system `git` binary to build local upstream and
//! gitolite-admin repositories, so the full CLI can be exercised without
//! any network access.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;

/// Get a Command for the git-mirror binary.
pub fn git_mirror_cmd() -> Command {
    let mut cmd = Command::cargo_bin("git-mirror").unwrap();
    // Deterministic output and a usable commit identity for admin pushes.
    cmd.env("NO_COLOR", "1")
        .env("GIT_AUTHOR_NAME", "e2e")
        .env("GIT_AUTHOR_EMAIL", "e2e@example.invalid")
        .env("GIT_COMMITTER_NAME", "e2e")
        .env("GIT_COMMITTER_EMAIL", "e2e@example.invalid");
    cmd
}

/// Create a fake mirror directory (the shallow heuristic only checks for
/// `config` and `HEAD`).
#[allow(dead_code)]
pub fn make_fake_mirror(base: &Path, rel: &str) -> PathBuf {
    let dir = base.join(rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config"), "[core]\n\tbare = true\n").unwrap();
    fs::write(dir.join("HEAD"), "ref: refs/heads/master\n").unwrap();
    dir
}

/// Run the system git binary, panicking on failure.
#[allow(dead_code)]
pub fn run_git(args: &[&str], cwd: &Path) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "e2e")
        .env("GIT_AUTHOR_EMAIL", "e2e@example.invalid")
        .env("GIT_COMMITTER_NAME", "e2e")
        .env("GIT_COMMITTER_EMAIL", "e2e@example.invalid")
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a bare gitolite-admin repository seeded with a minimal
/// `conf/gitolite.conf`, returning the bare repo path (usable as an
/// `--admin-url`).
#[allow(dead_code)]
pub fn make_admin_remote(root: &Path) -> PathBuf {
    let bare = root.join("gitolite-admin.git");
    fs::create_dir_all(&bare).unwrap();
    run_git(&["init", "--bare", "."], &bare);

    let seed = root.join("admin-seed");
    run_git(
        &["clone", bare.to_str().unwrap(), seed.to_str().unwrap()],
        root,
    );
    fs::create_dir_all(seed.join("conf")).unwrap();
    fs::write(
        seed.join("conf/gitolite.conf"),
        "repo gitolite-admin\n    RW+ = admin\n",
    )
    .unwrap();
    run_git(&["add", "conf"], &seed);
    run_git(&["commit", "-m", "seed gitolite.conf"], &seed);
    run_git(&["push", "origin", "HEAD"], &seed);

    bare
}
