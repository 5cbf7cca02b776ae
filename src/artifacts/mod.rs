//! Data structures and algorithms
//!
//! - `core`: user-error taxonomy
//! - `objects`: object model (blobs, commits, ids)
//! - `log`: commit history traversal
//! - `checkout`: working-tree reconciliation
//! - `merge`: split-point discovery and three-way resolution
//! - `status`: working-tree status classification
//! - `remote`: peer repositories and object transfer

pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod remote;
pub mod status;
