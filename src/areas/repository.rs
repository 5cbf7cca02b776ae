//! Repository facade
//!
//! The `Repository` type coordinates the four persistent areas (object
//! database, staging, workspace, refs) and is the receiver for every
//! porcelain command. Commands live in `crate::commands` as `impl
//! Repository` blocks; this module only wires the areas together.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Repository directory name
pub const GITLITE_DIR: &str = ".gitlite";

/// Object database directory name
const DATABASE_DIR: &str = "objects";

/// Staging file name
const STAGING_FILE: &str = "STAGING";

/// Remote map file, relative to the repository directory
const REMOTES_FILE: &str = "remotes/REMOTES";

/// Gitlite repository
///
/// Coordinates all repository operations. Components are rooted at the
/// working directory passed in, so tests can instantiate isolated
/// repositories in temporary directories.
pub struct Repository {
    /// Working directory root
    path: Box<Path>,
    /// Output writer (stdout in the binary, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Staging area
    staging: RefCell<Staging>,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Reference manager
    refs: Refs,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        let database = Database::new(path.join(GITLITE_DIR).join(DATABASE_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(GITLITE_DIR).into_boxed_path());
        let staging = Staging::open(path.join(GITLITE_DIR).join(STAGING_FILE).into_boxed_path())?;

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            staging: RefCell::new(staging),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlite_path(&self) -> PathBuf {
        self.path.join(GITLITE_DIR)
    }

    pub fn remotes_path(&self) -> PathBuf {
        self.gitlite_path().join(REMOTES_FILE)
    }

    /// Whether a repository has been initialized at this root
    pub fn is_initialized(&self) -> bool {
        self.gitlite_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn staging(&'_ self) -> RefMut<'_, Staging> {
        self.staging.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Load the commit HEAD currently points at
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let head_oid = self.refs.resolve_head()?;
        self.database.load_commit(&head_oid)
    }
}
