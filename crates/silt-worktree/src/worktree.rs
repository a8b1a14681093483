use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use silt_store::Blob;
use silt_types::ObjectId;

use crate::error::{WorktreeError, WorktreeResult};

/// Flat working-directory access.
///
/// Tracked files live directly under the root; the repository metadata
/// directory (and any other dot-directory) is never listed or touched.
#[derive(Clone, Debug)]
pub struct Worktree {
    root: PathBuf,
}

impl Worktree {
    /// A worktree rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The working-directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Sorted names of all plain files in the working directory.
    ///
    /// Dot-files and directories are skipped: the tracked namespace is flat
    /// and the metadata directory must never look like user work.
    pub fn list_files(&self) -> WorktreeResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns `true` if `name` exists as a plain file.
    pub fn exists(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }

    /// Read a working file's bytes.
    pub fn read(&self, name: &str) -> WorktreeResult<Vec<u8>> {
        match fs::read(self.file_path(name)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(WorktreeError::FileNotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Write (create or overwrite) a working file.
    pub fn write(&self, name: &str, bytes: &[u8]) -> WorktreeResult<()> {
        fs::write(self.file_path(name), bytes)?;
        Ok(())
    }

    /// Delete a working file. Missing files are tolerated.
    pub fn delete(&self, name: &str) -> WorktreeResult<()> {
        match fs::remove_file(self.file_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The blob digest the working copy of `name` would be stored under.
    pub fn file_digest(&self, name: &str) -> WorktreeResult<ObjectId> {
        let bytes = self.read(name)?;
        Ok(Blob::new(name, bytes).id()?)
    }
}
