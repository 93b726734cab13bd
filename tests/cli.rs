// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! End-to-end tests driving the compiled binary against real git repos.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const TESTER_NAME: &str = "Tester";
const TESTER_EMAIL: &str = "tester@example.com";

fn git(repo: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .env_remove("GIT_AUTHOR_NAME")
        .env_remove("GIT_AUTHOR_EMAIL")
        .env_remove("GIT_COMMITTER_NAME")
        .env_remove("GIT_COMMITTER_EMAIL")
        .output()
        .expect("git command failed to start");
    assert!(
        out.status.success(),
        "git command failed: {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn init_repo(tmp: &TempDir, branch: &str) -> PathBuf {
    let repo = tmp.path().join("repo");
    fs::create_dir_all(&repo).expect("create repo dir");
    let status = Command::new("git")
        .arg("init")
        .arg("-b")
        .arg(branch)
        .arg(&repo)
        .status()
        .expect("git init failed to start");
    assert!(status.success(), "git init failed");
    git(&repo, &["config", "user.name", TESTER_NAME]);
    git(&repo, &["config", "user.email", TESTER_EMAIL]);
    git(&repo, &["config", "commit.gpgsign", "false"]);
    repo
}

/// Create a bare repository, register it as `origin` and push the branch.
fn add_bare_remote(tmp: &TempDir, repo: &Path, branch: &str) -> PathBuf {
    let remote = tmp.path().join("remote.git");
    let status = Command::new("git")
        .arg("init")
        .arg("--bare")
        .arg("-b")
        .arg(branch)
        .arg(&remote)
        .status()
        .expect("git init --bare failed to start");
    assert!(status.success(), "git init --bare failed");
    git(
        repo,
        &["remote", "add", "origin", remote.to_str().expect("remote path")],
    );
    git(repo, &["push", "origin", branch]);
    remote
}

fn commit(repo: &Path, message: &str) {
    git(repo, &["commit", "--allow-empty", "-m", message]);
}

fn commit_as(repo: &Path, name: &str, email: &str, message: &str) {
    let name_config = format!("user.name={}", name);
    let email_config = format!("user.email={}", email);
    git(
        repo,
        &[
            "-c",
            &name_config,
            "-c",
            &email_config,
            "commit",
            "--allow-empty",
            "-m",
            message,
        ],
    );
}

fn signed(title: &str) -> String {
    format!(
        "{}\n\nSigned-off-by: {} <{}>",
        title, TESTER_NAME, TESTER_EMAIL
    )
}

fn rev_parse(repo: &Path, reference: &str) -> String {
    git(repo, &["rev-parse", reference]).trim().to_string()
}

/// Build a command for the binary with a clean environment.
///
/// The ambient environment is dropped entirely so that the CI the tests
/// themselves run under is never detected.
fn dco_guard(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dco-guard"));
    cmd.current_dir(dir);
    cmd.env_clear();
    if let Some(path) = std::env::var_os("PATH") {
        cmd.env("PATH", path);
    }
    cmd
}

#[test]
fn no_commits_to_check_on_default_branch() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));

    dco_guard(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected: git (default)"))
        .stdout(predicate::str::contains("No commits to check"));
}

#[test]
fn signed_commits_pass() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, &signed("add one thing"));
    commit(
        &repo,
        &format!(
            "add another thing\n\nWith some description.\n\nSigned-off-by: {} <{}>",
            TESTER_NAME, TESTER_EMAIL
        ),
    );

    dco_guard(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking commits: "))
        .stdout(predicate::str::contains("All good!"));
}

#[test]
fn unsigned_commit_fails_with_hash() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, "add a thing without signing it");
    let unsigned_hash = rev_parse(&repo, "HEAD");

    dco_guard(&repo)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing sign-off(s):"))
        .stdout(predicate::str::contains(unsigned_hash))
        .stdout(predicate::str::contains("no sign-off found"));
}

#[test]
fn sign_off_must_match_author() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    // Signed, but by somebody other than the author
    commit_as(&repo, "Po", "po@example.com", &signed("add a thing"));

    dco_guard(&repo)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "sign-off not found for commit author: Po po@example.com",
        ));
}

#[test]
fn quiet_mode_prints_nothing() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, "unsigned");

    dco_guard(&repo)
        .arg("-q")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn quiet_env_var_accepts_truthy_values() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, "unsigned");

    dco_guard(&repo)
        .env("DCO_GUARD_QUIET", "on")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn invalid_boolean_env_var_is_rejected() {
    let tmp = TempDir::new().expect("tempdir");

    dco_guard(tmp.path())
        .env("DCO_GUARD_QUIET", "banana")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid boolean value"))
        .stderr(predicate::str::contains("banana"));
}

#[test]
fn quiet_and_verbose_conflict() {
    let tmp = TempDir::new().expect("tempdir");

    dco_guard(tmp.path())
        .args(["-q", "-v"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("'quiet' and 'verbose'"));
}

#[test]
fn quiet_and_verbose_conflict_across_sources() {
    let tmp = TempDir::new().expect("tempdir");

    // One side from the CLI, the other from the environment
    dco_guard(tmp.path())
        .arg("-q")
        .env("DCO_GUARD_VERBOSE", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'quiet' and 'verbose'"));

    dco_guard(tmp.path())
        .arg("-v")
        .env("DCO_GUARD_QUIET", "yes")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'quiet' and 'verbose'"));
}

#[test]
fn default_branch_and_from_remote_conflict() {
    let tmp = TempDir::new().expect("tempdir");

    dco_guard(tmp.path())
        .args(["-b", "main", "-d"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot both be set"));
}

#[test]
fn version_flag_prints_package_version() {
    let tmp = TempDir::new().expect("tempdir");

    dco_guard(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dco-guard"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn default_branch_env_var_is_honored() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "dev");
    commit(&repo, &signed("init"));

    // Would fail with the built-in default since 'master' does not exist
    dco_guard(&repo)
        .env("DCO_GUARD_DEFAULT_BRANCH", "dev")
        .assert()
        .success()
        .stdout(predicate::str::contains("No commits to check"));
}

#[test]
fn excluded_email_is_exempt() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, "unsigned bot commit");

    dco_guard(&repo)
        .args(["-e", &format!("other@example.com,{}", TESTER_EMAIL)])
        .assert()
        .success()
        .stdout(predicate::str::contains("All good!"));
}

#[test]
fn excluded_pattern_is_exempt() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, "unsigned bot commit");

    dco_guard(&repo)
        .args(["--exclude-pattern", r"^tester@.*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All good!"));

    // A pattern that does not match the author still fails
    dco_guard(&repo)
        .args(["--exclude-pattern", r"^bot@.*"])
        .assert()
        .code(1);
}

#[test]
fn merge_commits_skipped_by_default() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, &signed("feature work"));
    git(&repo, &["checkout", "master"]);
    commit(&repo, &signed("master work"));
    git(&repo, &["checkout", "feature"]);
    git(&repo, &["merge", "master", "-m", "Merge branch 'master' into feature"]);

    dco_guard(&repo)
        .assert()
        .success()
        .stdout(predicate::str::contains("All good!"));

    // The unsigned merge commit is an infraction once merge checking is on
    dco_guard(&repo)
        .arg("-m")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("no sign-off found"));
}

#[test]
fn warns_when_no_commits_were_checked() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "side"]);
    commit(&repo, &signed("side work"));
    let side = rev_parse(&repo, "HEAD");
    git(&repo, &["checkout", "master"]);
    git(&repo, &["merge", "--no-ff", "side", "-m", "Merge branch 'side'"]);
    let merge = rev_parse(&repo, "HEAD");

    // The only commit in the range is a merge commit, which is skipped
    dco_guard(&repo)
        .env("GITLAB_CI", "true")
        .env("CI_DEFAULT_BRANCH", "master")
        .env("CI_COMMIT_BRANCH", "master")
        .env("CI_COMMIT_SHA", &merge)
        .env("CI_COMMIT_BEFORE_SHA", &side)
        .assert()
        .success()
        .stdout(predicate::str::contains("All good!"))
        .stdout(predicate::str::contains(
            "Warning: no commits were actually checked",
        ));
}

#[test]
fn verbose_prints_options_and_sign_offs() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, &signed("feature work"));

    dco_guard(&repo)
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("Options:"))
        .stdout(predicate::str::contains("check-merge-commits: false"))
        .stdout(predicate::str::contains("using default branch 'master'"))
        .stdout(predicate::str::contains(format!(
            "found sign-off: {} {}",
            TESTER_NAME, TESTER_EMAIL
        )))
        .stdout(predicate::str::contains("All good!"));
}

#[test]
fn gitlab_default_branch_checks_new_commits() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("first"));
    let base = rev_parse(&repo, "HEAD");
    commit(&repo, "second, unsigned");
    let unsigned_hash = rev_parse(&repo, "HEAD");
    commit(&repo, &signed("third"));
    let head = rev_parse(&repo, "HEAD");

    dco_guard(&repo)
        .env("GITLAB_CI", "true")
        .env("CI_DEFAULT_BRANCH", "master")
        .env("CI_COMMIT_BRANCH", "master")
        .env("CI_COMMIT_SHA", &head)
        .env("CI_COMMIT_BEFORE_SHA", &base)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Detected: GitLab CI"))
        .stdout(predicate::str::contains(unsigned_hash));
}

#[test]
fn gitlab_merge_request_uses_target_branch_sha() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    let target_sha = rev_parse(&repo, "HEAD");
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, &signed("feature work"));
    let head = rev_parse(&repo, "HEAD");

    dco_guard(&repo)
        .env("GITLAB_CI", "true")
        .env("CI_COMMIT_SHA", &head)
        .env("CI_MERGE_REQUEST_ID", "1")
        .env("CI_MERGE_REQUEST_TARGET_BRANCH_NAME", "master")
        .env("CI_MERGE_REQUEST_TARGET_BRANCH_SHA", &target_sha)
        .assert()
        .success()
        .stdout(predicate::str::contains("All good!"));
}

#[test]
fn gitlab_branch_pipeline_fetches_default_branch() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    add_bare_remote(&tmp, &repo, "master");
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, "unsigned feature work");
    let head = rev_parse(&repo, "HEAD");

    dco_guard(&repo)
        .env("GITLAB_CI", "true")
        .env("CI_DEFAULT_BRANCH", "master")
        .env("CI_COMMIT_BRANCH", "feature")
        .env("CI_COMMIT_SHA", &head)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("no sign-off found"));
}

#[test]
fn gitlab_missing_head_commit_fails() {
    let tmp = TempDir::new().expect("tempdir");

    dco_guard(tmp.path())
        .env("GITLAB_CI", "true")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error: "))
        .stdout(predicate::str::contains("CI_COMMIT_SHA"));
}

#[test]
fn gitlab_takes_priority_over_circleci() {
    let tmp = TempDir::new().expect("tempdir");

    dco_guard(tmp.path())
        .env("GITLAB_CI", "true")
        .env("CIRCLECI", "true")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Detected: GitLab CI"));
}

#[test]
fn circleci_uses_base_revision_when_provided() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    let base = rev_parse(&repo, "HEAD");
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, &signed("feature work"));
    let head = rev_parse(&repo, "HEAD");

    dco_guard(&repo)
        .env("CIRCLECI", "true")
        .env("CIRCLE_SHA1", &head)
        .env("CIRCLE_BASE_REVISION", &base)
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected: CircleCI"))
        .stdout(predicate::str::contains(format!(
            "checking commits off of base revision '{}'",
            base
        )))
        .stdout(predicate::str::contains("All good!"));
}

#[test]
fn appveyor_pull_request_uses_local_fork_point() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, "unsigned feature work");
    let head = rev_parse(&repo, "HEAD");

    dco_guard(&repo)
        .env("APPVEYOR", "True")
        .env("APPVEYOR_REPO_COMMIT", &head)
        .env("APPVEYOR_REPO_BRANCH", "master")
        .env("APPVEYOR_PULL_REQUEST_NUMBER", "3")
        .env("APPVEYOR_PULL_REQUEST_HEAD_REPO_BRANCH", "feature")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Detected: AppVeyor"))
        .stdout(predicate::str::contains("no sign-off found"));
}

#[test]
fn azure_pull_request_fetches_target_branch() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "master");
    commit(&repo, &signed("init"));
    add_bare_remote(&tmp, &repo, "master");
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, &signed("feature work"));
    let head = rev_parse(&repo, "HEAD");

    dco_guard(&repo)
        .env("TF_BUILD", "True")
        .env("BUILD_SOURCEVERSION", &head)
        .env("BUILD_SOURCEBRANCHNAME", "feature")
        .env("SYSTEM_PULLREQUEST_PULLREQUESTID", "7")
        .env("SYSTEM_PULLREQUEST_TARGETBRANCH", "master")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected: Azure Pipelines"))
        .stdout(predicate::str::contains("All good!"));
}

#[test]
fn github_pull_request_with_no_new_commits() {
    let tmp = TempDir::new().expect("tempdir");
    let payload = tmp.path().join("event.json");
    fs::write(
        &payload,
        r#"{"pull_request": {"base": {"sha": "same", "ref": "master"}, "head": {"sha": "same", "ref": "feature"}}}"#,
    )
    .expect("write payload");

    dco_guard(tmp.path())
        .env("GITHUB_ACTIONS", "true")
        .env("GITHUB_TOKEN", "dummy-token")
        .env("GITHUB_EVENT_PATH", &payload)
        .env("GITHUB_EVENT_NAME", "pull_request")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected: GitHub Actions"))
        .stdout(predicate::str::contains("No commits to check"));
}

#[test]
fn github_missing_token_prints_hint() {
    let tmp = TempDir::new().expect("tempdir");

    dco_guard(tmp.path())
        .env("GITHUB_ACTIONS", "true")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Did you forget to include this in your workflow config?",
        ))
        .stdout(predicate::str::contains("secrets.GITHUB_TOKEN"));
}

#[test]
fn github_unsupported_event_fails() {
    let tmp = TempDir::new().expect("tempdir");
    let payload = tmp.path().join("event.json");
    fs::write(&payload, "{}").expect("write payload");

    dco_guard(tmp.path())
        .env("GITHUB_ACTIONS", "true")
        .env("GITHUB_TOKEN", "dummy-token")
        .env("GITHUB_EVENT_PATH", &payload)
        .env("GITHUB_EVENT_NAME", "release")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unsupported workflow event"))
        .stdout(predicate::str::contains("release"));
}

#[test]
fn default_branch_resolved_from_remote() {
    let tmp = TempDir::new().expect("tempdir");
    let repo = init_repo(&tmp, "trunk");
    commit(&repo, &signed("init"));
    add_bare_remote(&tmp, &repo, "trunk");
    git(&repo, &["checkout", "-b", "feature"]);
    commit(&repo, "unsigned feature work");

    dco_guard(&repo)
        .args(["-d", "-v"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "got default branch 'trunk' from remote 'origin'",
        ))
        .stdout(predicate::str::contains("no sign-off found"));
}
