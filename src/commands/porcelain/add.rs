use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;

impl Repository {
    pub fn add(&self, name: &str) -> anyhow::Result<()> {
        if !self.workspace().contains(name) {
            anyhow::bail!(UserError::NoSuchFile);
        }

        let content = self.workspace().read_file(name)?;
        let blob_id = self.database().put(content)?;

        let head = self.head_commit()?;
        self.staging()
            .stage_addition(name, blob_id, head.blob_id(name))?;

        Ok(())
    }
}
