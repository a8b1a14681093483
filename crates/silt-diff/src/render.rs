//! Unified-format rendering of a [`FileDiff`].

use std::fmt::Write;

use crate::diff::{DiffLine, FileDiff};

/// Render a diff in unified format.
///
/// Labels name the two sides (for example `a/notes.txt` and `b/notes.txt`).
/// Identical versions render to an empty string.
pub fn unified(diff: &FileDiff, old_label: &str, new_label: &str) -> String {
    if diff.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "--- {old_label}");
    let _ = writeln!(out, "+++ {new_label}");

    for hunk in &diff.hunks {
        let _ = writeln!(
            out,
            "@@ -{},{} +{},{} @@",
            hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
        );
        for line in &hunk.lines {
            match line {
                DiffLine::Context(text) => {
                    let _ = writeln!(out, " {text}");
                }
                DiffLine::Removed(text) => {
                    let _ = writeln!(out, "-{text}");
                }
                DiffLine::Added(text) => {
                    let _ = writeln!(out, "+{text}");
                }
            }
        }
    }

    out
}
