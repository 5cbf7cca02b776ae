use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;

impl Repository {
    pub fn rm(&self, name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        let is_staged = self.staging().staged_for_addition(name).is_some();
        let is_tracked = head.tracks(name);

        if !is_staged && !is_tracked {
            anyhow::bail!(UserError::NothingToRemove);
        }

        if is_staged {
            self.staging().unstage_addition(name)?;
        }

        if is_tracked {
            self.staging().stage_removal(name)?;
            self.workspace().safe_delete(name)?;
        }

        Ok(())
    }
}
