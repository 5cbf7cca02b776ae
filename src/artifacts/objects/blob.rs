//! Blob object
//!
//! A blob is one file version: the raw bytes, nothing else. Filenames and
//! history live in commits; two files with identical contents share one blob.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use bytes::Bytes;
use derive_new::new;

/// File content snapshot
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(content: &Bytes) -> anyhow::Result<Self> {
        Ok(Self::new(content.clone()))
    }
}

impl Object for Blob {}
