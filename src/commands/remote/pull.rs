use crate::areas::repository::Repository;

impl Repository {
    pub fn pull(&self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        self.fetch(remote_name, branch_name)?;

        let tracking_branch = format!("{}/{}", remote_name, branch_name);
        self.merge(&tracking_branch)
    }
}
