use similar::{ChangeTag, TextDiff};

/// How the file changed between the two versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileChange {
    /// Absent on the old side, present on the new.
    Added,
    /// Present on the old side, absent on the new.
    Deleted,
    /// Present on both sides with different contents.
    Modified,
    /// Present on both sides with identical contents.
    Unchanged,
}

/// Structured diff of one file between two versions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDiff {
    /// Whole-file classification.
    pub change: FileChange,
    /// Contiguous change regions with context.
    pub hunks: Vec<DiffHunk>,
}

impl FileDiff {
    /// Returns `true` if the versions are identical.
    pub fn is_empty(&self) -> bool {
        self.change == FileChange::Unchanged
    }

    /// Lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.count_lines(|l| matches!(l, DiffLine::Added(_)))
    }

    /// Lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.count_lines(|l| matches!(l, DiffLine::Removed(_)))
    }

    fn count_lines(&self, pred: impl Fn(&DiffLine) -> bool) -> usize {
        self.hunks.iter().flat_map(|h| &h.lines).filter(|l| pred(l)).count()
    }
}

/// A contiguous region of changes, with 1-based line positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// Starting line in the old version.
    pub old_start: usize,
    /// Lines of the old version covered by this hunk.
    pub old_count: usize,
    /// Starting line in the new version.
    pub new_start: usize,
    /// Lines of the new version covered by this hunk.
    pub new_count: usize,
    /// The hunk body.
    pub lines: Vec<DiffLine>,
}

/// One line of a hunk, without its trailing newline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// Unchanged context.
    Context(String),
    /// Present only in the new version.
    Added(String),
    /// Present only in the old version.
    Removed(String),
}

/// Diff two optional versions of a file.
///
/// `None` stands for the file being absent on that side, so an addition is
/// `(None, Some(..))` and a deletion `(Some(..), None)`. Content that is not
/// valid UTF-8 gets a single synthetic hunk instead of line output.
pub fn diff_versions(old: Option<&[u8]>, new: Option<&[u8]>) -> FileDiff {
    let change = match (old, new) {
        (None, Some(_)) => FileChange::Added,
        (Some(_), None) => FileChange::Deleted,
        _ if old == new => FileChange::Unchanged,
        _ => FileChange::Modified,
    };
    if change == FileChange::Unchanged {
        return FileDiff {
            change,
            hunks: Vec::new(),
        };
    }

    let old_bytes = old.unwrap_or_default();
    let new_bytes = new.unwrap_or_default();
    let (old_text, new_text) = match (
        std::str::from_utf8(old_bytes),
        std::str::from_utf8(new_bytes),
    ) {
        (Ok(o), Ok(n)) => (o, n),
        _ => {
            return FileDiff {
                change,
                hunks: vec![binary_hunk(old_bytes, new_bytes)],
            }
        }
    };

    FileDiff {
        change,
        hunks: text_hunks(old_text, new_text),
    }
}

fn text_hunks(old: &str, new: &str) -> Vec<DiffHunk> {
    let diff = TextDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in diff.grouped_ops(3) {
        let Some(first) = group.first() else { continue };
        let mut hunk = DiffHunk {
            old_start: first.old_range().start + 1,
            old_count: 0,
            new_start: first.new_range().start + 1,
            new_count: 0,
            lines: Vec::new(),
        };

        for op in &group {
            for change in diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        hunk.old_count += 1;
                        hunk.new_count += 1;
                        hunk.lines.push(DiffLine::Context(text));
                    }
                    ChangeTag::Delete => {
                        hunk.old_count += 1;
                        hunk.lines.push(DiffLine::Removed(text));
                    }
                    ChangeTag::Insert => {
                        hunk.new_count += 1;
                        hunk.lines.push(DiffLine::Added(text));
                    }
                }
            }
        }
        hunks.push(hunk);
    }

    hunks
}

fn binary_hunk(old: &[u8], new: &[u8]) -> DiffHunk {
    let mut lines = Vec::new();
    if !old.is_empty() {
        lines.push(DiffLine::Removed(format!("(binary, {} bytes)", old.len())));
    }
    if !new.is_empty() {
        lines.push(DiffLine::Added(format!("(binary, {} bytes)", new.len())));
    }
    DiffHunk {
        old_start: 1,
        old_count: usize::from(!old.is_empty()),
        new_start: 1,
        new_count: usize::from(!new.is_empty()),
        lines,
    }
}
