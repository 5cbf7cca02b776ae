use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::UserError;
use crate::artifacts::merge::resolve::{Resolution, conflict_envelope, resolve};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

impl Repository {
    pub fn merge(&self, branch_name: &str) -> anyhow::Result<()> {
        if !self.staging().is_empty() {
            anyhow::bail!(UserError::UncommittedChanges);
        }
        let Some(given_tip) = self.refs().read_branch(branch_name)? else {
            anyhow::bail!(UserError::BranchNotFound);
        };
        let current_branch = self.refs().current_branch()?;
        if branch_name == current_branch {
            anyhow::bail!(UserError::SelfMerge);
        }
        let current_tip = self.refs().resolve_head()?;

        let database = self.database();
        let finder = SplitPointFinder::new(|commit_id: &ObjectId| {
            Ok(database.load_commit(commit_id)?.parents().to_vec())
        });
        let split_point = finder.find_split_point(&current_tip, &given_tip)?;

        if split_point.as_ref() == Some(&given_tip) {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }
        if split_point.as_ref() == Some(&current_tip) {
            self.checkout_branch(branch_name)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let current = database.load_commit(&current_tip)?;
        let given = database.load_commit(&given_tip)?;
        // Disjoint histories merge against an empty snapshot.
        let split_entries = match &split_point {
            Some(split_oid) => database.load_commit(split_oid)?.entries().clone(),
            None => BTreeMap::new(),
        };

        Migration::new(self, &current, &given).check_untracked()?;

        let filenames: BTreeSet<&String> = split_entries
            .keys()
            .chain(current.entries().keys())
            .chain(given.entries().keys())
            .collect();

        let mut conflicted = false;
        for name in filenames {
            let split_blob = split_entries.get(name.as_str());
            let current_blob = current.blob_id(name);
            let given_blob = given.blob_id(name);

            match resolve(split_blob, current_blob, given_blob) {
                Resolution::Unchanged => {}
                Resolution::TakeGiven(blob_id) => {
                    let blob = database.load_blob(&blob_id)?;
                    self.workspace().write_file(name, blob.content())?;
                    self.staging().stage_addition(name, blob_id, None)?;
                }
                Resolution::Remove => {
                    self.workspace().safe_delete(name)?;
                    self.staging().stage_removal(name)?;
                }
                Resolution::Conflict => {
                    conflicted = true;
                    let merged = conflict_envelope(
                        &self.load_side_bytes(current_blob)?,
                        &self.load_side_bytes(given_blob)?,
                    );
                    let blob_id = self.database().put(merged.clone())?;
                    self.workspace().write_file(name, &merged)?;
                    self.staging().stage_addition(name, blob_id, None)?;
                }
            }
        }

        let message = format!("Merged {} into {}.", branch_name, current_branch);
        self.commit_with_parents(&message, Some(given_tip))?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    // A side deleted since the split point contributes empty contents.
    fn load_side_bytes(&self, blob_id: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match blob_id {
            Some(blob_id) => Ok(self.database().load_blob(blob_id)?.content().clone()),
            None => Ok(Bytes::new()),
        }
    }
}
