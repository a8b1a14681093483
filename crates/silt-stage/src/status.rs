//! Status report types produced by the repository and rendered by the CLI.

/// How a tracked or staged file differs from its working copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileState {
    /// The working copy's digest no longer matches the staged/tracked digest.
    Modified,
    /// The working copy is gone without a staged removal.
    Deleted,
}

impl std::fmt::Display for FileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Modified => write!(f, "modified"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// A full working-tree status snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// All branch names, sorted.
    pub branches: Vec<String>,
    /// The checked-out branch, `None` when HEAD is detached.
    pub current_branch: Option<String>,
    /// Filenames staged for addition.
    pub staged: Vec<String>,
    /// Filenames staged for removal.
    pub removed: Vec<String>,
    /// Tracked or staged files whose working copy drifted, with how.
    pub unstaged: Vec<(String, FileState)>,
    /// Working-tree files neither staged nor tracked.
    pub untracked: Vec<String>,
}

impl StatusReport {
    /// Returns `true` if nothing is staged and the working tree is clean.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.removed.is_empty()
            && self.unstaged.is_empty()
            && self.untracked.is_empty()
    }
}
