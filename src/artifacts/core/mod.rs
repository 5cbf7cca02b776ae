//! User-facing error taxonomy
//!
//! Every command failure that reaches the user carries one of these fixed
//! messages. Library code propagates `anyhow::Error`; the variants below are
//! constructed at the point where a precondition fails and recovered by the
//! binary with `downcast_ref` to print the message and exit non-zero.

use thiserror::Error;

/// Command failures with fixed user-visible messages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("A Gitlite version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("Not in an initialized Gitlite directory.")]
    NotInitialized,
    #[error("File does not exist.")]
    NoSuchFile,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NoChanges,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("File does not exist in that commit.")]
    NoSuchFileInCommit,
    /// Checkout of a branch that does not exist
    #[error("No such branch exists.")]
    NoSuchBranch,
    /// Merge or rm-branch against a branch that does not exist
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,
    #[error("No need to checkout the current branch.")]
    CheckoutCurrent,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedWouldBeOverwritten,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("Remote directory not found.")]
    NoRemote,
    #[error("That remote does not have that branch.")]
    NoRemoteBranch,
    #[error("Please pull down remote changes before pushing.")]
    PushWouldRewrite,
    #[error("A remote with that name already exists.")]
    RemoteExists,
    #[error("A remote with that name does not exist.")]
    NoSuchRemote,
}
