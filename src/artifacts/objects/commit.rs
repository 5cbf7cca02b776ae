//! Commit object
//!
//! A commit is an immutable snapshot record: a single-line message, one or
//! two parent ids, a timestamp, and a flat filename → blob-id map.
//!
//! ## Format
//!
//! On disk, line-based ASCII:
//! ```text
//! <message>
//! <parent1-id-or-"0">
//! [<parent2-id>]          present iff merge commit
//! <timestamp>
//! <N>
//! <blob-id> <filename>    repeated N times, sorted by filename
//! ```
//!
//! Whether the third line is a second parent or the timestamp is decided by
//! the `:` character: timestamps always contain one, commit ids never do.
//! The digest is taken over these exact bytes, so serialization must
//! round-trip bit-for-bit.

use crate::artifacts::objects::ROOT_PARENT;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::collections::BTreeMap;

/// Timestamp layout `Www Mmm DD HH:MM:SS YYYY +0000`
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Message of the root commit every repository starts from
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Snapshot record in the commit DAG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Single-line commit message
    message: String,
    /// Parent commit ids: empty for the root, two for merge commits
    parents: Vec<ObjectId>,
    /// Creation time, rendered verbatim when displayed
    timestamp: DateTime<FixedOffset>,
    /// Filename → blob id, kept sorted for deterministic serialization
    entries: BTreeMap<String, ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        entries: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            message,
            parents,
            timestamp,
            entries,
        }
    }

    /// The canonical root commit materialized by `init`
    ///
    /// Serializes to exactly
    /// `initial commit\n0\nThu Jan 01 00:00:00 1970 +0000\n0\n`,
    /// so its id is reproducible across repositories.
    pub fn initial() -> Self {
        let epoch = Utc
            .timestamp_opt(0, 0)
            .single()
            .expect("epoch is a valid timestamp")
            .fixed_offset();

        Commit::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            Vec::new(),
            epoch,
            BTreeMap::new(),
        )
    }

    /// Timestamp for a commit being created right now
    pub fn timestamp_now() -> DateTime<FixedOffset> {
        Utc::now().fixed_offset()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, None for the root commit
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Rendered timestamp, identical to the serialized line
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Filename → blob id map of this snapshot
    pub fn entries(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }

    /// Blob id bound to `name` in this snapshot, if tracked
    pub fn blob_id(&self, name: &str) -> Option<&ObjectId> {
        self.entries.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = Vec::new();

        lines.push(self.message.clone());
        match self.parents.first() {
            Some(parent) => lines.push(parent.as_ref().to_string()),
            None => lines.push(ROOT_PARENT.to_string()),
        }
        if let Some(second_parent) = self.parents.get(1) {
            lines.push(second_parent.as_ref().to_string());
        }
        lines.push(self.readable_timestamp());
        lines.push(self.entries.len().to_string());
        for (name, blob_id) in &self.entries {
            lines.push(format!("{} {}", blob_id.as_ref(), name));
        }

        let mut content = lines.join("\n");
        content.push('\n');

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(content: &Bytes) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(content).context("Commit content is not valid UTF-8")?;
        let mut lines = content.lines();

        let message = lines
            .next()
            .context("Invalid commit: missing message line")?
            .to_string();

        let parent_line = lines.next().context("Invalid commit: missing parent line")?;
        let mut parents = Vec::new();
        if parent_line != ROOT_PARENT {
            parents.push(ObjectId::try_parse(parent_line.to_string())?);
        }

        // A timestamp always contains ':'; a second-parent id never does.
        let mut next_line = lines
            .next()
            .context("Invalid commit: missing timestamp line")?;
        if !next_line.contains(':') {
            parents.push(ObjectId::try_parse(next_line.to_string())?);
            next_line = lines
                .next()
                .context("Invalid commit: missing timestamp line")?;
        }

        let timestamp = DateTime::parse_from_str(next_line, TIMESTAMP_FORMAT)
            .with_context(|| format!("Invalid commit timestamp: {next_line}"))?;

        let entry_count: usize = lines
            .next()
            .context("Invalid commit: missing entry count line")?
            .parse()
            .context("Invalid commit: entry count is not a number")?;

        let mut entries = BTreeMap::new();
        for _ in 0..entry_count {
            let entry_line = lines.next().context("Invalid commit: missing entry line")?;
            let (blob_id, name) = entry_line
                .split_once(' ')
                .context("Invalid commit: malformed entry line")?;
            entries.insert(name.to_string(), ObjectId::try_parse(blob_id.to_string())?);
        }

        if entries.len() != entry_count {
            anyhow::bail!("Invalid commit: duplicate entry filenames");
        }

        Ok(Commit::new(message, parents, timestamp, entries))
    }
}

impl Object for Commit {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object::digest;
    use pretty_assertions::assert_eq;
    use proptest::proptest;

    const INITIAL_COMMIT_BYTES: &str = "initial commit\n0\nThu Jan 01 00:00:00 1970 +0000\n0\n";

    fn sample_oid(seed: u8) -> ObjectId {
        digest(&[seed])
    }

    fn sample_timestamp() -> DateTime<FixedOffset> {
        DateTime::parse_from_str("Tue Mar 04 09:15:27 2025 +0000", TIMESTAMP_FORMAT)
            .expect("valid sample timestamp")
    }

    #[test]
    fn initial_commit_serializes_to_canonical_bytes() {
        let commit = Commit::initial();
        let content = commit.serialize().unwrap();

        assert_eq!(content.as_ref(), INITIAL_COMMIT_BYTES.as_bytes());
        assert_eq!(
            commit.object_id().unwrap(),
            digest(INITIAL_COMMIT_BYTES.as_bytes())
        );
    }

    #[test]
    fn single_parent_commit_round_trips() {
        let mut entries = BTreeMap::new();
        entries.insert("a.txt".to_string(), sample_oid(1));
        entries.insert("b.txt".to_string(), sample_oid(2));
        let commit = Commit::new(
            "add a and b".to_string(),
            vec![sample_oid(9)],
            sample_timestamp(),
            entries,
        );

        let content = commit.serialize().unwrap();
        let parsed = Commit::deserialize(&content).unwrap();

        assert_eq!(parsed, commit);
        assert_eq!(parsed.serialize().unwrap(), content);
    }

    #[test]
    fn merge_commit_round_trips_with_second_parent() {
        let commit = Commit::new(
            "Merged topic into master.".to_string(),
            vec![sample_oid(3), sample_oid(4)],
            sample_timestamp(),
            BTreeMap::new(),
        );

        let content = commit.serialize().unwrap();
        let parsed = Commit::deserialize(&content).unwrap();

        assert_eq!(parsed.parents().len(), 2);
        assert_eq!(parsed, commit);
        assert_eq!(parsed.serialize().unwrap(), content);
    }

    #[test]
    fn third_line_colon_disambiguates_timestamp_from_parent() {
        // Two parents: third line is a 40-hex id, no colon.
        let merge = Commit::new(
            "m".to_string(),
            vec![sample_oid(5), sample_oid(6)],
            sample_timestamp(),
            BTreeMap::new(),
        );
        let content = merge.serialize().unwrap();
        let third_line = std::str::from_utf8(&content).unwrap().lines().nth(2).unwrap();
        assert!(!third_line.contains(':'));

        // One parent: third line is the timestamp and carries colons.
        let plain = Commit::new(
            "p".to_string(),
            vec![sample_oid(5)],
            sample_timestamp(),
            BTreeMap::new(),
        );
        let content = plain.serialize().unwrap();
        let third_line = std::str::from_utf8(&content).unwrap().lines().nth(2).unwrap();
        assert!(third_line.contains(':'));
    }

    #[test]
    fn entries_serialize_sorted_by_filename() {
        let mut entries = BTreeMap::new();
        entries.insert("zebra.txt".to_string(), sample_oid(1));
        entries.insert("alpha.txt".to_string(), sample_oid(2));
        entries.insert("mango.txt".to_string(), sample_oid(3));
        let commit = Commit::new(
            "sorted".to_string(),
            vec![sample_oid(9)],
            sample_timestamp(),
            entries,
        );

        let content = commit.serialize().unwrap();
        let names: Vec<&str> = std::str::from_utf8(&content)
            .unwrap()
            .lines()
            .skip(4)
            .filter_map(|line| line.split_once(' ').map(|(_, name)| name))
            .collect();

        assert_eq!(names, vec!["alpha.txt", "mango.txt", "zebra.txt"]);
    }

    #[test]
    fn stored_timestamp_renders_verbatim() {
        let commit = Commit::new(
            "t".to_string(),
            vec![sample_oid(7)],
            sample_timestamp(),
            BTreeMap::new(),
        );
        let parsed = Commit::deserialize(&commit.serialize().unwrap()).unwrap();

        assert_eq!(parsed.readable_timestamp(), "Tue Mar 04 09:15:27 2025 +0000");
    }

    proptest! {
        #[test]
        fn arbitrary_snapshots_round_trip(
            message in "[a-zA-Z0-9 ]{1,40}",
            names in proptest::collection::btree_set("[a-z]{1,12}\\.txt", 0..8),
            merge in proptest::bool::ANY,
        ) {
            let entries = names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), sample_oid(i as u8)))
                .collect::<BTreeMap<_, _>>();
            let parents = if merge {
                vec![sample_oid(250), sample_oid(251)]
            } else {
                vec![sample_oid(250)]
            };
            let commit = Commit::new(message, parents, sample_timestamp(), entries);

            let content = commit.serialize().unwrap();
            let parsed = Commit::deserialize(&content).unwrap();

            assert_eq!(parsed, commit);
            assert_eq!(parsed.serialize().unwrap(), content);
        }
    }
}
