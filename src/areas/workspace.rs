//! Working-tree I/O
//!
//! All reads and writes of user files go through the workspace, which is
//! rooted at the repository's working directory. The repository directory
//! itself is invisible to listings, and deletion refuses to touch anything
//! outside the working-tree root.

use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".gitlite", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read workspace file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write workspace file {}", file_path.display()))?;

        Ok(())
    }

    /// Delete a working-tree file, refusing paths that escape the root
    ///
    /// Missing files are not an error; reconciliation deletes whatever of
    /// the old snapshot is still present.
    pub fn safe_delete(&self, name: &str) -> anyhow::Result<()> {
        let relative = Path::new(name);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|component| matches!(component, Component::ParentDir));
        if escapes {
            anyhow::bail!("Refusing to delete path outside the working tree: {name}");
        }

        let file_path = self.path.join(relative);
        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Unable to delete file {}", file_path.display()))?;
        }

        Ok(())
    }

    /// Enumerate working-tree files as repository-relative names
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        Ok(WalkDir::new(self.path.as_ref())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
            .collect::<Vec<_>>())
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<String> {
        if path.is_file() && !Self::is_ignored(path) {
            let relative = path.strip_prefix(self.path.as_ref()).ok()?;
            Some(relative.to_string_lossy().to_string())
        } else {
            None
        }
    }
}
