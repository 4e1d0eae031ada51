//! End-to-end tests for `git-mirror gitolite-add`.

mod common;

use assert_fs::TempDir;
use predicates::prelude::*;

use common::{git_mirror_cmd, make_admin_remote};

#[test]
fn test_gitolite_add_help() {
    git_mirror_cmd()
        .arg("gitolite-add")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("read-only stanza"));
}

#[test]
fn test_gitolite_add_rejects_bad_url_before_admin_work() {
    git_mirror_cmd()
        .arg("gitolite-add")
        .arg("ftp://example.com/a/b")
        .arg("--admin-url")
        .arg("git@host:gitolite-admin")
        .arg("--admin-dir")
        .arg("/nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported URL format"));
}

#[test]
fn test_gitolite_add_upsert_and_rerun_unchanged() {
    let temp = TempDir::new().unwrap();
    let admin_remote = make_admin_remote(temp.path());
    let admin_dir = temp.path().join("admin-checkout");

    git_mirror_cmd()
        .arg("gitolite-add")
        .arg("https://github.com/psf/requests.git")
        .arg("--admin-url")
        .arg(&admin_remote)
        .arg("--admin-dir")
        .arg(&admin_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "UPDATED mirrors/github.com/psf/requests.git",
        ));

    let text = std::fs::read_to_string(admin_dir.join("conf/mirrors.conf")).unwrap();
    assert!(text.contains("repo mirrors/github.com/psf/requests.git"));

    // Re-adding the same URL is a no-op and must not rewrite the document.
    git_mirror_cmd()
        .arg("gitolite-add")
        .arg("git@github.com:psf/requests.git")
        .arg("--admin-url")
        .arg(&admin_remote)
        .arg("--admin-dir")
        .arg(&admin_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "UNCHANGED mirrors/github.com/psf/requests.git",
        ));
    assert_eq!(
        std::fs::read_to_string(admin_dir.join("conf/mirrors.conf")).unwrap(),
        text
    );
}

#[test]
fn test_gitolite_add_nested_namespace() {
    let temp = TempDir::new().unwrap();
    let admin_remote = make_admin_remote(temp.path());
    let admin_dir = temp.path().join("admin-checkout");

    git_mirror_cmd()
        .arg("gitolite-add")
        .arg("https://gitlab.com/group/sub/repo.git")
        .arg("--admin-url")
        .arg(&admin_remote)
        .arg("--admin-dir")
        .arg(&admin_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "UPDATED mirrors/gitlab.com/group/sub/repo.git",
        ));
}
