use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::UserError;
use crate::artifacts::log::HistoryWalker;

impl Repository {
    /// Reconcile the working tree to an arbitrary commit and retarget the
    /// current branch to it (short ids accepted)
    pub fn reset(&self, commit_id: &str) -> anyhow::Result<()> {
        let walker = HistoryWalker::new(self.database());
        let Some((target_oid, target)) = walker.resolve_commit_id(commit_id)? else {
            anyhow::bail!(UserError::NoSuchCommit);
        };

        let current = self.head_commit()?;
        Migration::new(self, &current, &target).run()?;

        let current_branch = self.refs().current_branch()?;
        self.refs().write_branch(&current_branch, &target_oid)?;

        Ok(())
    }
}
