use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;

/// Branch every repository starts on
pub const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            anyhow::bail!(UserError::AlreadyInitialized);
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create refs/heads directory")?;

        // The canonical root commit, so its id is identical in every repository.
        let initial_commit = Commit::initial();
        let commit_id = self.database().store(&initial_commit)?;

        self.refs().write_branch(DEFAULT_BRANCH, &commit_id)?;
        self.refs().set_head(DEFAULT_BRANCH)?;
        self.staging().clear()?;

        Ok(())
    }
}
