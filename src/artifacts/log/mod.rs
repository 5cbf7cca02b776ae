//! History walker
//!
//! Traversal of the commit DAG by parent links: the first-parent walk
//! behind `log`, the store-wide enumeration behind `global-log` and `find`,
//! and short-id resolution.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Read-only walker over the commit history in a database
pub struct HistoryWalker<'r> {
    database: &'r Database,
}

impl<'r> HistoryWalker<'r> {
    pub fn new(database: &'r Database) -> Self {
        HistoryWalker { database }
    }

    /// Walk from `tip` following first parents until the root
    pub fn first_parent_walk(&self, tip: ObjectId) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let mut history = Vec::new();
        let mut cursor = Some(tip);

        while let Some(commit_id) = cursor {
            let commit = self.database.load_commit(&commit_id)?;
            cursor = commit.first_parent().cloned();
            history.push((commit_id, commit));
        }

        Ok(history)
    }

    /// Every commit object in the store, in filesystem-enumeration order
    ///
    /// Blobs share the store; objects that do not parse as commits are
    /// skipped.
    pub fn all_commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        Ok(self
            .database
            .list_object_ids()?
            .into_iter()
            .filter_map(|object_id| {
                self.database
                    .try_load_commit(&object_id)
                    .map(|commit| (object_id, commit))
            })
            .collect())
    }

    /// Ids of every commit whose message equals `message` exactly
    pub fn find_by_message(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self
            .all_commits()?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(object_id, _)| object_id)
            .collect())
    }

    /// Resolve a possibly abbreviated commit id
    ///
    /// Returns the first stored object the prefix matches, provided it
    /// parses as a commit. Ambiguous prefixes resolve to the first hit.
    pub fn resolve_commit_id(&self, prefix: &str) -> anyhow::Result<Option<(ObjectId, Commit)>> {
        let Some(object_id) = self.database.expand_prefix(prefix)? else {
            return Ok(None);
        };

        Ok(self
            .database
            .try_load_commit(&object_id)
            .map(|commit| (object_id, commit)))
    }
}
