//! End-to-end tests for `git-mirror update-all`.

mod common;

use assert_fs::TempDir;
use predicates::prelude::*;

use common::{git_mirror_cmd, make_fake_mirror, run_git};

#[test]
fn test_update_all_help() {
    git_mirror_cmd()
        .arg("update-all")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetch updates for all mirrors"));
}

#[test]
fn test_update_all_no_mirrors() {
    let temp = TempDir::new().unwrap();

    git_mirror_cmd()
        .arg("update-all")
        .arg("--base-dir")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No mirrors found"));

    assert!(temp.path().join(".last_sync").exists());
}

#[test]
fn test_update_all_fetches_real_mirror() {
    let temp = TempDir::new().unwrap();
    let upstream = temp.path().join("upstream/tool.git");
    std::fs::create_dir_all(&upstream).unwrap();
    run_git(&["init", "--bare", "."], &upstream);

    let base = temp.path().join("mirrors");
    git_mirror_cmd()
        .arg("clone")
        .arg(&upstream)
        .arg("--base-dir")
        .arg(&base)
        .assert()
        .success();

    git_mirror_cmd()
        .arg("update-all")
        .arg("--base-dir")
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK]"))
        .stdout(predicate::str::contains("_local/upstream/tool.git"));

    assert!(base.join(".last_sync").exists());
}

#[test]
fn test_update_all_reports_broken_mirror() {
    let temp = TempDir::new().unwrap();
    // Fake mirror: passes the heuristic but is not a usable repository.
    make_fake_mirror(temp.path(), "github.com/a/broken.git");

    git_mirror_cmd()
        .arg("update-all")
        .arg("--base-dir")
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("[FAIL]"))
        .stderr(predicate::str::contains("failed to update"));

    // Sync time is recorded even when some mirrors fail.
    assert!(temp.path().join(".last_sync").exists());
}
