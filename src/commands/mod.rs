//! Command implementations
//!
//! Each command is an `impl Repository` block in its own file; the binary
//! in `main.rs` only parses arguments and dispatches here.

pub mod porcelain;
pub mod remote;
