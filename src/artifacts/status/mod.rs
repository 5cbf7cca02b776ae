//! Working-tree status classification
//!
//! Classifies every file across HEAD, the staging area, and the working
//! tree into the five status buckets, each rendered under its fixed header
//! in lexicographic order.

use crate::areas::repository::Repository;
use crate::artifacts::objects::object::digest;
use std::collections::BTreeMap;
use std::io::Write;

/// How an unstaged change manifests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Deleted,
}

impl ChangeKind {
    fn annotation(&self) -> &'static str {
        match self {
            ChangeKind::Modified => "(modified)",
            ChangeKind::Deleted => "(deleted)",
        }
    }
}

/// Snapshot of the five status buckets
#[derive(Debug)]
pub struct StatusReport {
    current_branch: String,
    branches: Vec<String>,
    staged: Vec<String>,
    removed: Vec<String>,
    modifications: BTreeMap<String, ChangeKind>,
    untracked: Vec<String>,
}

impl StatusReport {
    /// Classify the repository's current state
    pub fn gather(repository: &Repository) -> anyhow::Result<Self> {
        let current_branch = repository.refs().current_branch()?;
        let branches = repository.refs().list_branches()?;
        let head = repository.head_commit()?;
        let staging = repository.staging();
        let workspace = repository.workspace();

        let staged = staging.additions().keys().cloned().collect();
        let removed = staging.removals().iter().cloned().collect();

        let mut modifications = BTreeMap::new();

        for (name, head_blob_id) in head.entries() {
            let staged_for_addition = staging.staged_for_addition(name).is_some();
            if workspace.contains(name) {
                // Edited since the last commit without being restaged.
                if !staged_for_addition {
                    let working_id = digest(&workspace.read_file(name)?);
                    if &working_id != head_blob_id {
                        modifications.insert(name.clone(), ChangeKind::Modified);
                    }
                }
            } else if !staged_for_addition && !staging.staged_for_removal(name) {
                modifications.insert(name.clone(), ChangeKind::Deleted);
            }
        }

        for (name, staged_blob_id) in staging.additions() {
            if workspace.contains(name) {
                let working_id = digest(&workspace.read_file(name)?);
                if &working_id != staged_blob_id {
                    modifications.insert(name.clone(), ChangeKind::Modified);
                }
            } else {
                modifications.insert(name.clone(), ChangeKind::Deleted);
            }
        }

        let mut untracked: Vec<String> = workspace
            .list_files()?
            .into_iter()
            .filter(|name| !head.tracks(name) && staging.staged_for_addition(name).is_none())
            .collect();
        untracked.sort();

        Ok(StatusReport {
            current_branch,
            branches,
            staged,
            removed,
            modifications,
            untracked,
        })
    }

    /// Render the five sections with their fixed headers
    pub fn render(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(writer, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(writer, "*{branch}")?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }

        writeln!(writer, "\n=== Staged Files ===")?;
        for name in &self.staged {
            writeln!(writer, "{name}")?;
        }

        writeln!(writer, "\n=== Removed Files ===")?;
        for name in &self.removed {
            writeln!(writer, "{name}")?;
        }

        writeln!(writer, "\n=== Modifications Not Staged For Commit ===")?;
        for (name, kind) in &self.modifications {
            writeln!(writer, "{name} {}", kind.annotation())?;
        }

        writeln!(writer, "\n=== Untracked Files ===")?;
        for name in &self.untracked {
            writeln!(writer, "{name}")?;
        }

        Ok(())
    }
}
