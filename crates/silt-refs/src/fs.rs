use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use silt_types::ObjectId;
use tracing::debug;

use crate::error::{RefError, RefResult};
use crate::names::{validate_branch_name, validate_remote_name};
use crate::traits::RefStore;
use crate::types::Head;

/// Filesystem-backed reference store.
///
/// Layout under the repository metadata root:
///
/// - `branches/<name>` -- one file per branch holding a hex commit digest
///   (names with slashes become nested directories)
/// - `HEAD` -- a branch name, or a hex digest when detached
/// - `remote/<name>` -- one file per remote holding a repository root path
pub struct FsRefStore {
    branches_dir: PathBuf,
    head_file: PathBuf,
    remote_dir: PathBuf,
}

impl FsRefStore {
    /// Open a ref store under `root`, creating its directories if needed.
    pub fn open(root: impl AsRef<Path>) -> RefResult<Self> {
        let root = root.as_ref();
        let store = Self {
            branches_dir: root.join("branches"),
            head_file: root.join("HEAD"),
            remote_dir: root.join("remote"),
        };
        fs::create_dir_all(&store.branches_dir)?;
        fs::create_dir_all(&store.remote_dir)?;
        Ok(store)
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.branches_dir.join(name)
    }

    fn collect_branches(
        &self,
        dir: &Path,
        prefix: &str,
        out: &mut Vec<(String, ObjectId)>,
    ) -> RefResult<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let Some(leaf) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let name = if prefix.is_empty() {
                leaf
            } else {
                format!("{prefix}/{leaf}")
            };
            if entry.file_type()?.is_dir() {
                self.collect_branches(&entry.path(), &name, out)?;
            } else if let Some(target) = self.read_branch(&name)? {
                out.push((name, target));
            }
        }
        Ok(())
    }
}

fn corrupt(what: &str) -> RefError {
    RefError::Io(std::io::Error::new(ErrorKind::InvalidData, what.to_string()))
}

impl RefStore for FsRefStore {
    fn read_branch(&self, name: &str) -> RefResult<Option<ObjectId>> {
        validate_branch_name(name)?;
        let content = match fs::read_to_string(self.branch_path(name)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let id = ObjectId::from_hex(content.trim())
            .map_err(|_| corrupt("branch file does not hold a digest"))?;
        Ok(Some(id))
    }

    fn write_branch(&self, name: &str, target: ObjectId) -> RefResult<()> {
        validate_branch_name(name)?;
        let path = self.branch_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, target.to_hex())?;
        debug!(branch = name, target = %target.short_hex(), "moved branch");
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> RefResult<()> {
        validate_branch_name(name)?;
        if self.head()?.branch_name() == Some(name) {
            return Err(RefError::DeleteCurrentBranch {
                name: name.to_string(),
            });
        }
        match fs::remove_file(self.branch_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RefError::NotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn branches(&self) -> RefResult<Vec<(String, ObjectId)>> {
        let mut out = Vec::new();
        self.collect_branches(&self.branches_dir, "", &mut out)?;
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }

    fn head(&self) -> RefResult<Head> {
        let content = match fs::read_to_string(&self.head_file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(RefError::HeadUnset),
            Err(e) => return Err(e.into()),
        };
        let content = content.trim();
        if content.is_empty() {
            return Err(corrupt("HEAD file is empty"));
        }
        // An existing branch of this name wins; otherwise a well-formed
        // digest reads as detached.
        if self.branch_path(content).is_file() {
            return Ok(Head::Symbolic(content.to_string()));
        }
        match ObjectId::from_hex(content) {
            Ok(id) => Ok(Head::Detached(id)),
            Err(_) => Ok(Head::Symbolic(content.to_string())),
        }
    }

    fn set_head(&self, branch: &str) -> RefResult<()> {
        validate_branch_name(branch)?;
        fs::write(&self.head_file, branch)?;
        debug!(branch, "HEAD now symbolic");
        Ok(())
    }

    fn set_head_detached(&self, target: ObjectId) -> RefResult<()> {
        fs::write(&self.head_file, target.to_hex())?;
        debug!(target = %target.short_hex(), "HEAD now detached");
        Ok(())
    }

    fn read_remote(&self, name: &str) -> RefResult<Option<PathBuf>> {
        validate_remote_name(name)?;
        match fs::read_to_string(self.remote_dir.join(name)) {
            Ok(content) => Ok(Some(PathBuf::from(content.trim()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn add_remote(&self, name: &str, path: &Path) -> RefResult<()> {
        validate_remote_name(name)?;
        let file = self.remote_dir.join(name);
        if file.exists() {
            return Err(RefError::RemoteExists {
                name: name.to_string(),
            });
        }
        fs::write(&file, path.to_string_lossy().as_bytes())?;
        Ok(())
    }

    fn remove_remote(&self, name: &str) -> RefResult<()> {
        validate_remote_name(name)?;
        match fs::remove_file(self.remote_dir.join(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RefError::RemoteNotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn remotes(&self) -> RefResult<Vec<(String, PathBuf)>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.remote_dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if let Some(path) = self.read_remote(name)? {
                    out.push((name.to_string(), path));
                }
            }
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }
}

impl std::fmt::Debug for FsRefStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsRefStore")
            .field("head_file", &self.head_file)
            .finish()
    }
}
