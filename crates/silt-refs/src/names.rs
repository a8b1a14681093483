//! Branch name validation following git-style conventions.
//!
//! Valid branch names:
//! - Must be non-empty
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..` (double dot) or `@{`
//! - Must not start or end with `.` or `/`
//! - Must not end with `.lock`
//! - Must not contain consecutive slashes (`//`)
//! - Components between slashes must be non-empty and not start with `.`

use crate::error::{RefError, RefResult};

/// Characters that are forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

/// Validate a branch name, returning `Ok(())` if valid.
///
/// Follows git-style naming conventions to prevent ambiguity and filesystem
/// issues. Slashes are allowed so remote tracking branches like
/// `origin/master` are ordinary branch names.
///
/// # Examples
///
/// ```
/// use silt_refs::names::validate_branch_name;
///
/// assert!(validate_branch_name("master").is_ok());
/// assert!(validate_branch_name("feature/auth").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("bad..name").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> RefResult<()> {
    if name.is_empty() {
        return Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason: "branch name must not be empty".into(),
        });
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(RefError::InvalidBranchName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    // `..` is parent traversal on the filesystem backend.
    if name.contains("..") {
        return Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason: "must not contain '..'".into(),
        });
    }

    if name.contains("@{") {
        return Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason: "must not contain '@{'".into(),
        });
    }

    if name.starts_with('.') || name.ends_with('.') {
        return Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason: "must not start or end with '.'".into(),
        });
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason: "must not start or end with '/'".into(),
        });
    }

    if name.ends_with(".lock") {
        return Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason: "must not end with '.lock'".into(),
        });
    }

    if name.contains("//") {
        return Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason: "must not contain consecutive slashes '//'".into(),
        });
    }

    for component in name.split('/') {
        if component.is_empty() {
            return Err(RefError::InvalidBranchName {
                name: name.to_string(),
                reason: "path components must not be empty".into(),
            });
        }
        if component.starts_with('.') {
            return Err(RefError::InvalidBranchName {
                name: name.to_string(),
                reason: format!("component must not start with '.': {component:?}"),
            });
        }
    }

    Ok(())
}

/// Validate a remote name. Must be a simple identifier (no slashes).
pub fn validate_remote_name(name: &str) -> RefResult<()> {
    if name.is_empty() {
        return Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason: "remote name must not be empty".into(),
        });
    }
    if name.contains('/') {
        return Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason: "remote name must not contain '/'".into(),
        });
    }
    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(RefError::InvalidBranchName {
                name: name.to_string(),
                reason: format!("remote name contains forbidden character: {ch:?}"),
            });
        }
    }
    Ok(())
}
