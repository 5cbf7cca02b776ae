//! Working-tree reconciliation
//!
//! Shared by `checkout <branch>`, `reset <commit>`, and `merge`: replace the
//! working tree's current snapshot with a target snapshot. The untracked
//! pre-check runs before any mutation, so a failing migration leaves the
//! working tree untouched.

use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Planned replacement of the current snapshot by a target snapshot
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Snapshot of the commit HEAD points at
    current: BTreeMap<String, ObjectId>,
    /// Snapshot of the commit being checked out
    target: BTreeMap<String, ObjectId>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current: &Commit, target: &Commit) -> Self {
        Migration {
            repository,
            current: current.entries().clone(),
            target: target.entries().clone(),
        }
    }

    /// Fail before mutating anything if the target would overwrite an
    /// untracked working file
    ///
    /// A file counts as in the way when the target tracks it, HEAD does
    /// not, it exists in the working tree, and it is not staged for
    /// addition.
    pub fn check_untracked(&self) -> anyhow::Result<()> {
        let staging = self.repository.staging();

        for name in self.target.keys() {
            let untracked = !self.current.contains_key(name)
                && self.repository.workspace().contains(name)
                && staging.staged_for_addition(name).is_none();
            if untracked {
                anyhow::bail!(UserError::UntrackedWouldBeOverwritten);
            }
        }

        Ok(())
    }

    /// Write every target file and delete every current-only file
    pub fn apply(&self) -> anyhow::Result<()> {
        for (name, blob_id) in &self.target {
            let blob = self.repository.database().load_blob(blob_id)?;
            self.repository.workspace().write_file(name, blob.content())?;
        }

        for name in self.current.keys() {
            if !self.target.contains_key(name) {
                self.repository.workspace().safe_delete(name)?;
            }
        }

        Ok(())
    }

    /// Pre-check, then apply, then clear staging
    pub fn run(&self) -> anyhow::Result<()> {
        self.check_untracked()?;
        self.apply()?;
        self.repository.staging().clear()?;

        Ok(())
    }
}
