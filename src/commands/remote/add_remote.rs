use crate::areas::repository::Repository;
use crate::artifacts::remote::RemoteMap;
use std::path::PathBuf;

impl Repository {
    pub fn add_remote(&self, remote_name: &str, remote_path: &str) -> anyhow::Result<()> {
        let mut remotes = RemoteMap::open(self.remotes_path().into_boxed_path())?;
        remotes.add(remote_name, PathBuf::from(remote_path))?;

        Ok(())
    }
}
