//! Reference namespace
//!
//! References are human-readable names pointing at commits:
//!
//! - HEAD: symbolic ref naming the checked-out branch,
//!   stored as `ref: refs/heads/<branch>\n`
//! - Branches: `refs/heads/<name>` files holding `<commit-id>\n`
//! - Remote-tracking branches: same files under the composite name
//!   `<remote>/<branch>`
//!
//! Ref rewrites take an advisory exclusive lock and go through a full
//! truncate-and-write; nothing relies on the lock for correctness.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Prefix of the HEAD symref contents
const SYMREF_PREFIX: &str = "ref: refs/heads/";

/// Name of the HEAD reference file
pub const HEAD_REF_NAME: &str = "HEAD";

/// Reference manager rooted at the repository directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (`.gitlite`)
    path: Box<Path>,
}

impl Refs {
    /// Point HEAD at a branch by name
    pub fn set_head(&self, branch_name: &str) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), format!("{SYMREF_PREFIX}{branch_name}\n"))
    }

    /// Name of the currently checked-out branch
    pub fn current_branch(&self) -> anyhow::Result<String> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("Unable to read HEAD at {}", head_path.display()))?;

        content
            .trim_end()
            .strip_prefix(SYMREF_PREFIX)
            .map(str::to_string)
            .with_context(|| format!("Malformed HEAD contents: {content:?}"))
    }

    /// Dereference HEAD through its branch to a commit id
    pub fn resolve_head(&self) -> anyhow::Result<ObjectId> {
        let branch_name = self.current_branch()?;
        self.read_branch(&branch_name)?
            .with_context(|| format!("HEAD names a missing branch: {branch_name}"))
    }

    /// Commit id a branch points at, None if the branch does not exist
    pub fn read_branch(&self, branch_name: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("Unable to read branch file {}", branch_path.display()))?;

        Ok(Some(ObjectId::try_parse(content.trim_end().to_string())?))
    }

    pub fn branch_exists(&self, branch_name: &str) -> bool {
        self.branch_path(branch_name).is_file()
    }

    /// Point a branch at a commit, creating the ref file if needed
    pub fn write_branch(&self, branch_name: &str, object_id: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(
            &self.branch_path(branch_name),
            format!("{}\n", object_id.as_ref()),
        )
    }

    pub fn delete_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_path = self.branch_path(branch_name);

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("Unable to delete branch file {}", branch_path.display()))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;

        Ok(())
    }

    /// All branch names, remote-tracking composites included, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let heads_path = self.heads_path();

        let mut branch_names = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                if entry.path().is_file() {
                    let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                    Some(relative_path.to_string_lossy().to_string())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        branch_names.sort();

        Ok(branch_names)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!("Invalid ref file path {}", path.display())
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Unable to open ref file {}", path.display()))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("Unable to remove empty branch directory {}", parent.display())
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join("refs").join("heads").into_boxed_path()
    }

    fn branch_path(&self, branch_name: &str) -> Box<Path> {
        self.heads_path().join(branch_name).into_boxed_path()
    }
}
