//! Merge machinery
//!
//! - `split_point`: most-recent-common-ancestor discovery on the commit DAG
//! - `resolve`: per-file three-way resolution and conflict-marker synthesis

pub mod resolve;
pub mod split_point;
