use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.commit_with_parents(message, None)?;
        Ok(())
    }

    /// Build a commit from HEAD ⊕ staging and advance the current branch
    ///
    /// A merge supplies the given tip as `second_parent`, which also waives
    /// the non-empty-staging precondition.
    pub(crate) fn commit_with_parents(
        &self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if message.is_empty() {
            anyhow::bail!(UserError::EmptyMessage);
        }
        if self.staging().is_empty() && second_parent.is_none() {
            anyhow::bail!(UserError::NoChanges);
        }

        let head_oid = self.refs().resolve_head()?;
        let head = self.database().load_commit(&head_oid)?;

        let mut entries = head.entries().clone();
        {
            let staging = self.staging();
            for (name, blob_id) in staging.additions() {
                entries.insert(name.clone(), blob_id.clone());
            }
            for name in staging.removals() {
                entries.remove(name);
            }
        }

        let mut parents = vec![head_oid];
        if let Some(second_parent) = second_parent {
            parents.push(second_parent);
        }

        let commit = Commit::new(
            message.to_string(),
            parents,
            Commit::timestamp_now(),
            entries,
        );
        let commit_id = self.database().store(&commit)?;

        // The branch moves only after the commit is durably stored.
        let current_branch = self.refs().current_branch()?;
        self.refs().write_branch(&current_branch, &commit_id)?;
        self.staging().clear()?;

        Ok(commit_id)
    }
}
