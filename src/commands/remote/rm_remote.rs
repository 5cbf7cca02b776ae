use crate::areas::repository::Repository;
use crate::artifacts::remote::RemoteMap;

impl Repository {
    pub fn rm_remote(&self, remote_name: &str) -> anyhow::Result<()> {
        let mut remotes = RemoteMap::open(self.remotes_path().into_boxed_path())?;
        remotes.remove(remote_name)?;

        Ok(())
    }
}
