use crate::areas::repository::Repository;
use crate::artifacts::status::StatusReport;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let report = StatusReport::gather(self)?;
        report.render(&mut **self.writer())?;

        Ok(())
    }
}
