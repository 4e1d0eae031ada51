//! End-to-end tests for the `git-mirror clone` command, using local bare
//! repositories as upstreams so no network access is required.

mod common;

use assert_fs::TempDir;
use predicates::prelude::*;

use common::{git_mirror_cmd, run_git};

#[test]
fn test_clone_help() {
    git_mirror_cmd()
        .arg("clone")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mirror-clone or update"));
}

#[test]
fn test_clone_unrecognized_url() {
    let temp = TempDir::new().unwrap();

    git_mirror_cmd()
        .arg("clone")
        .arg("definitely not a url")
        .arg("--base-dir")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported URL format"));
}

#[test]
fn test_clone_local_upstream_and_update() {
    let temp = TempDir::new().unwrap();
    let upstream = temp.path().join("upstream/tool.git");
    std::fs::create_dir_all(&upstream).unwrap();
    run_git(&["init", "--bare", "."], &upstream);

    let base = temp.path().join("mirrors");
    let expected = base.join("_local/upstream/tool.git");

    // First run mirror-clones.
    git_mirror_cmd()
        .arg("clone")
        .arg(&upstream)
        .arg("--base-dir")
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::contains("_local/upstream/tool.git"));
    assert!(expected.join("HEAD").exists(), "mirror should exist on disk");

    // Second run updates the existing mirror instead of recloning.
    git_mirror_cmd()
        .arg("clone")
        .arg(&upstream)
        .arg("--base-dir")
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::contains("_local/upstream/tool.git"));

    // The mirror is now discoverable.
    git_mirror_cmd()
        .arg("list")
        .arg("--base-dir")
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::contains("_local/upstream/tool.git"));
}
