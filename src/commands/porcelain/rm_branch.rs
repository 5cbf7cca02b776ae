use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;

impl Repository {
    pub fn rm_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(branch_name) {
            anyhow::bail!(UserError::BranchNotFound);
        }
        if branch_name == self.refs().current_branch()? {
            anyhow::bail!(UserError::CannotRemoveCurrent);
        }

        self.refs().delete_branch(branch_name)?;

        Ok(())
    }
}
