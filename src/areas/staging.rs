//! Staging area
//!
//! The mutable delta the next commit will apply to HEAD: additions map
//! filenames to the blob ids they will be bound to, removals name files the
//! next commit drops. A filename is never in both at once.
//!
//! ## File format
//!
//! Persisted at `.gitlite/STAGING` and rewritten in full on every mutation:
//! ```text
//! <A>
//! <filename>
//! <blob-id>        A pairs
//! <R>
//! <filename>       R lines
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Pending additions and removals for the next commit
#[derive(Debug)]
pub struct Staging {
    /// Path to the staging file (`.gitlite/STAGING`)
    path: Box<Path>,
    /// Filename → blob id the next commit will bind
    additions: BTreeMap<String, ObjectId>,
    /// Filenames the next commit will drop from the tracked set
    removals: BTreeSet<String>,
}

impl Staging {
    /// Open the staging area, loading the persisted state if present
    pub fn open(path: Box<Path>) -> anyhow::Result<Self> {
        let mut staging = Staging {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
        };
        staging.load()?;

        Ok(staging)
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn staged_for_addition(&self, name: &str) -> Option<&ObjectId> {
        self.additions.get(name)
    }

    pub fn staged_for_removal(&self, name: &str) -> bool {
        self.removals.contains(name)
    }

    /// Record an addition intent for `name`
    ///
    /// When the staged blob matches HEAD's binding the intent is dropped
    /// instead: re-adding an unchanged file is a no-op against HEAD. Any
    /// removal intent for the file is withdrawn either way.
    pub fn stage_addition(
        &mut self,
        name: &str,
        blob_id: ObjectId,
        head_binding: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        if head_binding == Some(&blob_id) {
            self.additions.remove(name);
        } else {
            self.additions.insert(name.to_string(), blob_id);
        }
        self.removals.remove(name);

        self.save()
    }

    /// Withdraw any addition intent for `name`
    pub fn unstage_addition(&mut self, name: &str) -> anyhow::Result<()> {
        self.additions.remove(name);
        self.save()
    }

    /// Record a removal intent for `name`
    pub fn stage_removal(&mut self, name: &str) -> anyhow::Result<()> {
        self.additions.remove(name);
        self.removals.insert(name.to_string());
        self.save()
    }

    /// Drop all pending intents
    ///
    /// Invoked at the end of every successful commit and of every
    /// working-tree-replacing operation.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.save()
    }

    fn load(&mut self) -> anyhow::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read staging file {}", self.path.display()))?;
        let mut lines = content.lines();

        let addition_count: usize = lines
            .next()
            .context("Invalid staging file: missing addition count")?
            .parse()
            .context("Invalid staging file: addition count is not a number")?;
        for _ in 0..addition_count {
            let name = lines
                .next()
                .context("Invalid staging file: missing addition filename")?;
            let blob_id = lines
                .next()
                .context("Invalid staging file: missing addition blob id")?;
            self.additions
                .insert(name.to_string(), ObjectId::try_parse(blob_id.to_string())?);
        }

        let removal_count: usize = lines
            .next()
            .context("Invalid staging file: missing removal count")?
            .parse()
            .context("Invalid staging file: removal count is not a number")?;
        for _ in 0..removal_count {
            let name = lines
                .next()
                .context("Invalid staging file: missing removal filename")?;
            self.removals.insert(name.to_string());
        }

        Ok(())
    }

    fn save(&self) -> anyhow::Result<()> {
        let mut lines = Vec::new();

        lines.push(self.additions.len().to_string());
        for (name, blob_id) in &self.additions {
            lines.push(name.clone());
            lines.push(blob_id.as_ref().to_string());
        }
        lines.push(self.removals.len().to_string());
        for name in &self.removals {
            lines.push(name.clone());
        }

        let mut content = lines.join("\n");
        content.push('\n');

        std::fs::write(&self.path, content)
            .with_context(|| format!("Unable to write staging file {}", self.path.display()))?;

        Ok(())
    }
}
