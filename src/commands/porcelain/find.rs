use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;
use crate::artifacts::log::HistoryWalker;
use std::io::Write;

impl Repository {
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let walker = HistoryWalker::new(self.database());

        let commit_ids = walker.find_by_message(message)?;
        if commit_ids.is_empty() {
            anyhow::bail!(UserError::NoCommitWithMessage);
        }

        let mut writer = self.writer();
        for commit_id in commit_ids {
            writeln!(writer, "{}", commit_id)?;
        }

        Ok(())
    }
}
