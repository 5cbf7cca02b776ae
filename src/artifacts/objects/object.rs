//! Serialization traits shared by all object kinds
//!
//! Objects are stored as the exact bytes their `serialize` produces; the
//! object id is the SHA-1 of those bytes. There is no framing header, so a
//! stored object digests back to its own file name.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};

/// Trait for serializing objects to their canonical byte form
pub trait Packable {
    /// Serialize the object to the exact bytes that get stored and hashed
    fn serialize(&self) -> Result<Bytes>;
}

/// Trait for deserializing objects from their stored bytes
pub trait Unpackable {
    /// Reconstruct the object from stored bytes
    fn deserialize(content: &Bytes) -> Result<Self>
    where
        Self: Sized;
}

/// Core object trait
///
/// Implemented by both object kinds (Blob, Commit). The id is derived from
/// the serialized content, never cached, so a mutated in-memory record can
/// never present a stale identity.
pub trait Object: Packable {
    /// Compute the object ID (SHA-1 hash of the serialized bytes)
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        Ok(digest(&content))
    }
}

/// SHA-1 over raw bytes, rendered as a 40-char lowercase hex id
pub fn digest(content: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(content);

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}")).expect("sha1 digest is always 40 hex chars")
}
