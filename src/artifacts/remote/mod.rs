//! Remote synchronization
//!
//! Peers are sibling repositories reached through the filesystem. The
//! remote map binds remote names to working-directory paths; a peer's
//! object store and refs are opened in place and objects move between the
//! two stores by content address, so transfers are idempotent.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::repository::GITLITE_DIR;
use crate::artifacts::core::UserError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Named remotes persisted at `remotes/REMOTES`
///
/// File format mirrors the staging file: a count line, then a
/// `<name>\n<path>\n` pair per remote.
#[derive(Debug)]
pub struct RemoteMap {
    path: Box<Path>,
    entries: BTreeMap<String, PathBuf>,
}

impl RemoteMap {
    pub fn open(path: Box<Path>) -> anyhow::Result<Self> {
        let mut remotes = RemoteMap {
            path,
            entries: BTreeMap::new(),
        };
        remotes.load()?;

        Ok(remotes)
    }

    pub fn get(&self, name: &str) -> Option<&PathBuf> {
        self.entries.get(name)
    }

    pub fn add(&mut self, name: &str, path: PathBuf) -> anyhow::Result<()> {
        if self.entries.contains_key(name) {
            anyhow::bail!(UserError::RemoteExists);
        }

        self.entries.insert(name.to_string(), path);
        self.save()
    }

    pub fn remove(&mut self, name: &str) -> anyhow::Result<()> {
        if self.entries.remove(name).is_none() {
            anyhow::bail!(UserError::NoSuchRemote);
        }

        self.save()
    }

    fn load(&mut self) -> anyhow::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read remote map {}", self.path.display()))?;
        let mut lines = content.lines();

        let remote_count: usize = lines
            .next()
            .context("Invalid remote map: missing count line")?
            .parse()
            .context("Invalid remote map: count is not a number")?;
        for _ in 0..remote_count {
            let name = lines.next().context("Invalid remote map: missing name")?;
            let path = lines.next().context("Invalid remote map: missing path")?;
            self.entries.insert(name.to_string(), PathBuf::from(path));
        }

        Ok(())
    }

    fn save(&self) -> anyhow::Result<()> {
        let mut lines = vec![self.entries.len().to_string()];
        for (name, path) in &self.entries {
            lines.push(name.clone());
            lines.push(path.to_string_lossy().to_string());
        }

        let mut content = lines.join("\n");
        content.push('\n');

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }
        std::fs::write(&self.path, content)
            .with_context(|| format!("Unable to write remote map {}", self.path.display()))?;

        Ok(())
    }
}

/// A peer repository opened in place through the filesystem
#[derive(Debug)]
pub struct Peer {
    pub database: Database,
    pub refs: Refs,
}

impl Peer {
    /// Open the repository under `path`, failing if it holds none
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let gitlite_path = path.join(GITLITE_DIR);
        if !gitlite_path.is_dir() {
            anyhow::bail!(UserError::NoRemote);
        }

        Ok(Peer {
            database: Database::new(gitlite_path.join("objects").into_boxed_path()),
            refs: Refs::new(gitlite_path.into_boxed_path()),
        })
    }
}

/// Copy `tip` and its full history from one store into another
///
/// Breadth-first over both parents; each commit's blobs land before the
/// commit itself, and objects the destination already holds are skipped.
pub fn copy_history(
    source: &Database,
    destination: &Database,
    tip: &ObjectId,
) -> anyhow::Result<()> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([tip.clone()]);

    while let Some(commit_id) = queue.pop_front() {
        if !visited.insert(commit_id.clone()) {
            continue;
        }

        let commit = source.load_commit(&commit_id)?;

        for blob_id in commit.entries().values() {
            if !destination.contains(blob_id) {
                destination.put(source.get(blob_id)?)?;
            }
        }
        if !destination.contains(&commit_id) {
            destination.put(source.get(&commit_id)?)?;
        }

        for parent_id in commit.parents() {
            queue.push_back(parent_id.clone());
        }
    }

    Ok(())
}
