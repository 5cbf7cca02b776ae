use crate::areas::repository::Repository;
use crate::artifacts::log::HistoryWalker;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn log(&self) -> anyhow::Result<()> {
        let head_oid = self.refs().resolve_head()?;
        let walker = HistoryWalker::new(self.database());

        for (commit_id, commit) in walker.first_parent_walk(head_oid)? {
            self.print_log_entry(&commit_id, &commit)?;
        }

        Ok(())
    }

    pub(crate) fn print_log_entry(
        &self,
        commit_id: &ObjectId,
        commit: &Commit,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit_id)?;
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
