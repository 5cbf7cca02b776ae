use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;
use crate::artifacts::remote::{Peer, RemoteMap, copy_history};

impl Repository {
    pub fn fetch(&self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let remotes = RemoteMap::open(self.remotes_path().into_boxed_path())?;
        let Some(remote_path) = remotes.get(remote_name) else {
            anyhow::bail!(UserError::NoRemote);
        };
        let peer = Peer::open(remote_path)?;

        let Some(remote_tip) = peer.refs.read_branch(branch_name)? else {
            anyhow::bail!(UserError::NoRemoteBranch);
        };

        copy_history(&peer.database, self.database(), &remote_tip)?;

        let tracking_branch = format!("{}/{}", remote_name, branch_name);
        self.refs().write_branch(&tracking_branch, &remote_tip)?;

        Ok(())
    }
}
