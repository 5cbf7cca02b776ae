use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

use common::command::{init_repository_dir, run_gitlite_command};
use common::file::{FileSpec, write_file};

fn commit_file(dir: &std::path::Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_gitlite_command(dir, &["add", name]).assert().success();
    run_gitlite_command(dir, &["commit", message])
        .assert()
        .success();
}

#[rstest]
fn status_prints_all_five_headers_in_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_gitlite_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n",
        ));
}

#[rstest]
fn branches_are_sorted_with_the_current_one_starred(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_gitlite_command(dir.path(), &["branch", "zeta"])
        .assert()
        .success();
    run_gitlite_command(dir.path(), &["branch", "alpha"])
        .assert()
        .success();

    run_gitlite_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Branches ===\nalpha\n*master\nzeta\n",
        ));
}

#[rstest]
fn untracked_files_are_listed_in_name_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("beta.txt"), "b".to_string()));
    write_file(FileSpec::new(dir.path().join("alpha.txt"), "a".to_string()));

    run_gitlite_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Untracked Files ===\nalpha.txt\nbeta.txt\n",
        ));
}

#[rstest]
fn edited_tracked_file_shows_as_modified(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "original\n", "c1");

    write_file(FileSpec::new(dir.path().join("a.txt"), "edited\n".to_string()));

    run_gitlite_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\na.txt (modified)\n",
        ));
}

#[rstest]
fn deleted_tracked_file_shows_as_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "original\n", "c1");

    std::fs::remove_file(dir.path().join("a.txt")).unwrap();

    run_gitlite_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\na.txt (deleted)\n",
        ));
}

#[rstest]
fn staged_file_edited_afterwards_shows_as_modified(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "staged\n".to_string()));
    run_gitlite_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "edited after staging\n".to_string()));

    run_gitlite_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\na.txt (modified)\n",
        ));
}

#[rstest]
fn staged_file_deleted_afterwards_shows_as_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "staged\n".to_string()));
    run_gitlite_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    std::fs::remove_file(dir.path().join("a.txt")).unwrap();

    run_gitlite_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\na.txt (deleted)\n",
        ));
}

#[rstest]
fn file_staged_for_removal_is_not_reported_as_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "original\n", "c1");

    run_gitlite_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();

    run_gitlite_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\na.txt\n"))
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\n\n",
        ));
}

#[rstest]
fn clean_tracked_files_appear_in_no_bucket(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "content\n", "c1");

    run_gitlite_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt").not());
}
