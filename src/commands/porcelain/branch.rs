use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;

impl Repository {
    pub fn branch(&self, branch_name: &str) -> anyhow::Result<()> {
        if self.refs().branch_exists(branch_name) {
            anyhow::bail!(UserError::BranchExists);
        }

        let head_oid = self.refs().resolve_head()?;
        self.refs().write_branch(branch_name, &head_oid)?;

        Ok(())
    }
}
