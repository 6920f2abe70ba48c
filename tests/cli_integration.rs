//! Integration tests for the gitlet binary.
//!
//! These tests run the CLI in scratch directories and check its console
//! contract: what goes to stdout and the exit status.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Get a command for running gitlet in `dir`, isolated from any user config.
fn gitlet(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("GITLET_CONFIG", dir.path().join("no-such-config.toml"))
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("GITLET_LOG");
    cmd
}

fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    gitlet(&dir).arg("init").assert().success().stdout("");
    dir
}

fn commit(dir: &TempDir, file: &str, contents: &str, message: &str) {
    dir.child(file).write_str(contents).unwrap();
    gitlet(dir).args(["add", file]).assert().success();
    gitlet(dir).args(["commit", message]).assert().success().stdout("");
}

#[test]
fn version_flag_works() {
    let dir = TempDir::new().unwrap();
    gitlet(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlet"));
}

#[test]
fn missing_command_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    gitlet(&dir).assert().failure();
    gitlet(&dir).arg("frobnicate").assert().failure();
}

#[test]
fn init_creates_metadata_directory() {
    let dir = init_repo();
    dir.child(".gitlet").assert(predicate::path::is_dir());
    dir.child(".gitlet/state.json")
        .assert(predicate::path::is_file());
}

#[test]
fn user_errors_print_message_and_exit_zero() {
    let dir = TempDir::new().unwrap();
    gitlet(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout("Not in an initialized Gitlet directory.\n");

    let dir = init_repo();
    gitlet(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout("A Gitlet version-control system already exists in the current directory.\n");
    gitlet(&dir)
        .args(["add", "nope.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
    gitlet(&dir)
        .args(["commit", "empty"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[test]
fn quiet_still_prints_user_errors() {
    let dir = init_repo();
    gitlet(&dir)
        .args(["--quiet", "rm-branch", "master"])
        .assert()
        .success()
        .stdout("Cannot remove the current branch.\n");
}

#[test]
fn status_lists_all_sections() {
    let dir = init_repo();
    commit(&dir, "tracked.txt", "v1", "first");
    gitlet(&dir).args(["branch", "side"]).assert().success();

    dir.child("tracked.txt").write_str("v2").unwrap();
    dir.child("staged.txt").write_str("s").unwrap();
    dir.child("loose.txt").write_str("l").unwrap();
    gitlet(&dir).args(["add", "staged.txt"]).assert().success();

    let expected = "=== Branches ===\n\
                    *master\n\
                    side\n\
                    \n\
                    === Staged Files ===\n\
                    staged.txt\n\
                    \n\
                    === Removed Files ===\n\
                    \n\
                    === Modifications Not Staged For Commit ===\n\
                    tracked.txt (modified)\n\
                    \n\
                    === Untracked Files ===\n\
                    loose.txt\n\
                    \n";
    gitlet(&dir).arg("status").assert().success().stdout(expected);
}

#[test]
fn log_shows_entries_newest_first() {
    let dir = init_repo();
    commit(&dir, "a.txt", "1", "add a");

    let log = gitlet(&dir)
        .args(["--date-offset", "+0000", "log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let log = String::from_utf8(log).unwrap();

    let entries: Vec<&str> = log.split("===\n").filter(|s| !s.is_empty()).collect();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].starts_with("commit "));
    assert!(entries[0].ends_with("add a\n\n"));
    assert!(entries[1].contains("Date: Thu Jan 1 00:00:00 1970 +0000\n"));
    assert!(entries[1].ends_with("initial commit\n\n"));
}

#[test]
fn root_commit_date_uses_default_offset() {
    let dir = init_repo();
    gitlet(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Date: Wed Dec 31 16:00:00 1969 -0800\ninitial commit\n",
        ));
}

#[test]
fn find_prints_matching_ids() {
    let dir = init_repo();
    commit(&dir, "a.txt", "1", "needle");

    gitlet(&dir)
        .args(["find", "needle"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{64}\n$").unwrap());
    gitlet(&dir)
        .args(["find", "haystack"])
        .assert()
        .success()
        .stdout("Found no commit with that message.\n");
}

#[test]
fn checkout_file_forms() {
    let dir = init_repo();
    commit(&dir, "a.txt", "original", "first");
    dir.child("a.txt").write_str("edited").unwrap();

    gitlet(&dir)
        .args(["checkout", "--", "a.txt"])
        .assert()
        .success()
        .stdout("");
    dir.child("a.txt").assert("original");

    gitlet(&dir)
        .args(["checkout", "deadbeef", "--", "a.txt"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
    gitlet(&dir)
        .arg("checkout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect operands."));
}

#[test]
fn merge_reports_each_outcome() {
    let dir = init_repo();
    commit(&dir, "f", "a", "split");
    gitlet(&dir).args(["branch", "feat"]).assert().success();
    gitlet(&dir)
        .args(["merge", "feat"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    commit(&dir, "f", "b", "master change");
    gitlet(&dir).args(["checkout", "feat"]).assert().success();
    commit(&dir, "f", "c", "feat change");
    gitlet(&dir).args(["checkout", "master"]).assert().success();

    gitlet(&dir)
        .args(["--quiet", "merge", "feat"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");
    dir.child("f").assert("<<<<<<< HEAD\nb=======\nc>>>>>>>\n");
    gitlet(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged feat into master.\n"));
}

#[test]
fn merge_fast_forward_message() {
    let dir = init_repo();
    gitlet(&dir).args(["branch", "next"]).assert().success();
    gitlet(&dir).args(["checkout", "next"]).assert().success();
    commit(&dir, "n.txt", "n", "next work");
    gitlet(&dir).args(["checkout", "master"]).assert().success();
    dir.child("n.txt").assert(predicate::path::missing());

    gitlet(&dir)
        .args(["merge", "next"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");
    dir.child("n.txt").assert("n");

    gitlet(&dir)
        .args(["-q", "merge", "next"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn cwd_flag_targets_another_directory() {
    let repo = init_repo();
    let elsewhere = TempDir::new().unwrap();
    gitlet(&elsewhere)
        .arg("--cwd")
        .arg(repo.path())
        .args(["branch", "remote-side"])
        .assert()
        .success();
    gitlet(&repo)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("remote-side\n"));
}

#[test]
fn corrupt_state_is_an_internal_error() {
    let dir = init_repo();
    dir.child(".gitlet/state.json").write_str("{ not json").unwrap();
    gitlet(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error:"));
}
