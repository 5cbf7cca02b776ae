use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::UserError;
use crate::artifacts::log::HistoryWalker;
use crate::artifacts::objects::commit::Commit;

impl Repository {
    /// Replace the working tree with a branch's tip and move HEAD to it
    pub fn checkout_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let Some(target_oid) = self.refs().read_branch(branch_name)? else {
            anyhow::bail!(UserError::NoSuchBranch);
        };
        if branch_name == self.refs().current_branch()? {
            anyhow::bail!(UserError::CheckoutCurrent);
        }

        let current = self.head_commit()?;
        let target = self.database().load_commit(&target_oid)?;

        Migration::new(self, &current, &target).run()?;
        self.refs().set_head(branch_name)?;

        Ok(())
    }

    /// Restore one file from the HEAD commit
    pub fn checkout_file(&self, name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        self.restore_file(&head, name)
    }

    /// Restore one file from an arbitrary commit (short ids accepted)
    pub fn checkout_file_from_commit(&self, commit_id: &str, name: &str) -> anyhow::Result<()> {
        let walker = HistoryWalker::new(self.database());
        let Some((_, commit)) = walker.resolve_commit_id(commit_id)? else {
            anyhow::bail!(UserError::NoSuchCommit);
        };

        self.restore_file(&commit, name)
    }

    // File-level restore never touches HEAD or staging and has no
    // untracked check; it only overwrites the named file.
    fn restore_file(&self, commit: &Commit, name: &str) -> anyhow::Result<()> {
        let Some(blob_id) = commit.blob_id(name) else {
            anyhow::bail!(UserError::NoSuchFileInCommit);
        };

        let blob = self.database().load_blob(blob_id)?;
        self.workspace().write_file(name, blob.content())?;

        Ok(())
    }
}
