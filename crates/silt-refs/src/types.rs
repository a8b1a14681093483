use silt_types::ObjectId;

/// The state of HEAD: either symbolic (pointing to a branch) or detached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Head {
    /// HEAD points to a branch by name.
    Symbolic(String),
    /// HEAD is detached, pointing directly to a commit digest.
    Detached(ObjectId),
}

impl Head {
    /// The branch name, if HEAD is symbolic.
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            Head::Symbolic(name) => Some(name),
            Head::Detached(_) => None,
        }
    }

    /// Returns `true` if HEAD is detached.
    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }
}
