use assert_cmd::Command;
use m2_mirror::cli::{resolve_auth, AUTH_ENV_VAR};
use predicates::prelude::*;
use serial_test::serial;
use tempfile::tempdir;

fn bin() -> Command {
    Command::cargo_bin("m2-mirror").expect("binary exists")
}

#[test]
fn missing_required_flags_fail_fast() {
    let mut cmd = bin();
    cmd.arg("/tmp/some-repo");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--repo-id"));
}

#[test]
fn requires_at_least_one_repodir() {
    let mut cmd = bin();
    cmd.args(["--repo-id", "releases", "--repo-url", "http://localhost:8081"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("REPODIRS"));
}

#[test]
fn help_lists_the_operator_flags() {
    let mut cmd = bin();
    cmd.arg("--help");
    cmd.assert().success().stdout(
        predicate::str::contains("--force-upload")
            .and(predicate::str::contains("--include-group"))
            .and(predicate::str::contains("--include-artifact"))
            .and(predicate::str::contains("--insecure")),
    );
}

#[test]
fn malformed_auth_is_rejected_before_any_network_call() {
    let root = tempdir().expect("tempdir");
    let mut cmd = bin();
    cmd.env_remove(AUTH_ENV_VAR);
    cmd.args([
        "--repo-id",
        "releases",
        "--repo-url",
        "http://localhost:8081",
        "--auth",
        "no-colon-here",
    ])
    .arg(root.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("username:password"));
}

#[test]
fn invalid_include_regex_is_rejected() {
    let root = tempdir().expect("tempdir");
    let mut cmd = bin();
    cmd.args([
        "--repo-id",
        "releases",
        "--repo-url",
        "http://localhost:8081",
        "--include-group",
        "(",
    ])
    .arg(root.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("include-group"));
}

#[test]
fn missing_root_aborts_the_run() {
    let mut cmd = bin();
    cmd.env_remove(AUTH_ENV_VAR);
    cmd.args([
        "--repo-id",
        "releases",
        "--repo-url",
        "http://localhost:8081",
        "/definitely/not/here/m2",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not a readable directory"));
}

#[test]
#[serial]
fn auth_flag_overrides_environment() {
    std::env::set_var(AUTH_ENV_VAR, "envuser:envpass");
    let credentials = resolve_auth(Some("flaguser:flagpass"))
        .expect("flag credentials parse")
        .expect("credentials present");
    assert_eq!(credentials.username, "flaguser");
    assert_eq!(credentials.password, "flagpass");
    std::env::remove_var(AUTH_ENV_VAR);
}

#[test]
#[serial]
fn auth_falls_back_to_environment() {
    std::env::set_var(AUTH_ENV_VAR, "envuser:envpass");
    let credentials = resolve_auth(None)
        .expect("env credentials parse")
        .expect("credentials present");
    assert_eq!(credentials.username, "envuser");
    assert_eq!(credentials.password, "envpass");
    std::env::remove_var(AUTH_ENV_VAR);
}

#[test]
#[serial]
fn running_without_credentials_is_allowed() {
    std::env::remove_var(AUTH_ENV_VAR);
    let credentials = resolve_auth(None).expect("resolution succeeds");
    assert!(credentials.is_none());
}

#[test]
#[serial]
fn empty_username_is_rejected() {
    std::env::remove_var(AUTH_ENV_VAR);
    let err = resolve_auth(Some(":password")).expect_err("empty username must fail");
    assert!(err.to_string().contains("username:password"));
}
