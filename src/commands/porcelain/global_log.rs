use crate::areas::repository::Repository;
use crate::artifacts::log::HistoryWalker;

impl Repository {
    pub fn global_log(&self) -> anyhow::Result<()> {
        let walker = HistoryWalker::new(self.database());

        for (commit_id, commit) in walker.all_commits()? {
            self.print_log_entry(&commit_id, &commit)?;
        }

        Ok(())
    }
}
