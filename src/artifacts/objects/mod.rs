//! Object model
//!
//! Content-addressed objects stored in the repository:
//!
//! - `object_id`: 40-hex SHA-1 identifiers
//! - `object`: serialization traits shared by all object kinds
//! - `blob`: one file version, raw bytes
//! - `commit`: snapshot record binding filenames to blobs

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a rendered object id (40 hex characters)
pub const OBJECT_ID_LENGTH: usize = 40;

/// First-parent sentinel marking the root commit
pub const ROOT_PARENT: &str = "0";
