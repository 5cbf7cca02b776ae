//! Remote commands
//!
//! - `add_remote` / `rm_remote`: remote map maintenance
//! - `push` / `fetch` / `pull`: synchronization with a filesystem peer

pub mod add_remote;
pub mod fetch;
pub mod pull;
pub mod push;
pub mod rm_remote;
