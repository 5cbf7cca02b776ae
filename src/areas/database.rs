//! Content-addressed object store
//!
//! The store is a flat directory keyed by 40-hex object id. Objects are the
//! exact bytes they were hashed from, so `sha1(read(id)) == id` holds for
//! every stored object. Writes go through a temp file and rename so a
//! half-written object can never sit under its final name.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable, digest};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

static TEMP_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Object database
///
/// Stores and retrieves content-addressed objects. Objects are never
/// overwritten; putting identical bytes twice is a no-op yielding the
/// same id.
#[derive(Debug)]
pub struct Database {
    /// Path to the objects directory (`.gitlite/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Hash the bytes, persist them iff absent, and return the id
    pub fn put(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        let object_id = digest(&content);
        let object_path = self.path.join(object_id.as_ref());

        if !object_path.exists() {
            self.write_object(&object_path, &content)?;
        }

        Ok(object_id)
    }

    /// Serialize and persist an object, returning its id
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        self.put(object.serialize()?)
    }

    /// Read an object's raw bytes, failing if it is absent
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.as_ref());

        let content = std::fs::read(&object_path)
            .with_context(|| format!("Object {} not found in store", object_id))?;

        Ok(content.into())
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.as_ref()).exists()
    }

    /// Load and parse a commit record
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.get(object_id)?;
        Commit::deserialize(&content)
            .with_context(|| format!("Object {} is not a commit", object_id))
    }

    /// Load a commit if the object exists and parses as one
    ///
    /// Blobs and commits share the store with no type tag; a strict commit
    /// parse is the discriminator.
    pub fn try_load_commit(&self, object_id: &ObjectId) -> Option<Commit> {
        let content = self.get(object_id).ok()?;
        Commit::deserialize(&content).ok()
    }

    /// Load a blob's bytes
    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.get(object_id)?;
        Blob::deserialize(&content)
    }

    /// Enumerate every stored object id in filesystem order
    pub fn list_object_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut object_ids = Vec::new();

        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to read objects directory {}", self.path.display()))?
        {
            let entry = entry?;
            let file_name = entry.file_name();
            if let Ok(object_id) = ObjectId::try_parse(file_name.to_string_lossy().to_string()) {
                object_ids.push(object_id);
            }
        }

        Ok(object_ids)
    }

    /// Resolve an abbreviated id to the first stored id it prefixes
    ///
    /// A full-length id is returned as-is iff present. Ambiguous prefixes
    /// resolve to the first enumeration hit.
    pub fn expand_prefix(&self, prefix: &str) -> anyhow::Result<Option<ObjectId>> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(None);
        }

        Ok(self
            .list_object_ids()?
            .into_iter()
            .find(|object_id| object_id.matches_prefix(prefix)))
    }

    fn write_object(&self, object_path: &Path, content: &Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file onto the object path to make the write atomic
        std::fs::rename(&temp_object_path, object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!(
            "tmp-obj-{}-{}",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        )
    }
}
