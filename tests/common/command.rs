use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlite_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlite_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlite").expect("Failed to find gitlite binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Commit id a branch currently points at, read straight off the ref file
pub fn branch_tip(dir: &Path, branch_name: &str) -> String {
    let ref_path = dir.join(".gitlite").join("refs").join("heads").join(branch_name);
    std::fs::read_to_string(&ref_path)
        .unwrap_or_else(|e| panic!("Failed to read branch ref {:?}: {}", ref_path, e))
        .trim_end()
        .to_string()
}

/// Raw bytes of a stored object
pub fn read_object(dir: &Path, object_id: &str) -> String {
    let object_path = dir.join(".gitlite").join("objects").join(object_id);
    std::fs::read_to_string(&object_path)
        .unwrap_or_else(|e| panic!("Failed to read object {:?}: {}", object_path, e))
}
