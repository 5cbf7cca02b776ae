use crate::areas::repository::Repository;
use crate::artifacts::core::UserError;
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::remote::{Peer, RemoteMap, copy_history};

impl Repository {
    pub fn push(&self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let remotes = RemoteMap::open(self.remotes_path().into_boxed_path())?;
        let Some(remote_path) = remotes.get(remote_name) else {
            anyhow::bail!(UserError::NoRemote);
        };
        let peer = Peer::open(remote_path)?;

        let local_tip = self.refs().resolve_head()?;

        // Refuse to rewrite remote history: the remote tip must already be
        // part of ours. Every ancestor of the local tip is local, so the
        // check never needs the peer's store.
        if let Some(remote_tip) = peer.refs.read_branch(branch_name)? {
            let database = self.database();
            let finder = SplitPointFinder::new(|commit_id: &ObjectId| {
                Ok(database.load_commit(commit_id)?.parents().to_vec())
            });
            if !finder.is_ancestor(&remote_tip, &local_tip)? {
                anyhow::bail!(UserError::PushWouldRewrite);
            }
        }

        copy_history(self.database(), &peer.database, &local_tip)?;
        peer.refs.write_branch(branch_name, &local_tip)?;

        Ok(())
    }
}
