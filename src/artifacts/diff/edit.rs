use std::fmt::Display;

/// The three alignment decisions an edit script is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    Equal,
    Delete,
    Insert,
}

impl EditOp {
    pub fn symbol(&self) -> char {
        match self {
            EditOp::Equal => '=',
            EditOp::Delete => '-',
            EditOp::Insert => '+',
        }
    }

    /// Whether edits of this kind carry tokens of the old sequence.
    pub fn touches_source(&self) -> bool {
        matches!(self, EditOp::Equal | EditOp::Delete)
    }

    /// Whether edits of this kind carry tokens of the new sequence.
    pub fn touches_target(&self) -> bool {
        matches!(self, EditOp::Equal | EditOp::Insert)
    }
}

/// One alignment decision over a run of tokens.
///
/// Each variant carries exactly the positions its operation has: an `Equal`
/// run sits in both sequences, a `Delete` only in the old one (`a_pos`) and an
/// `Insert` only in the new one (`b_pos`). Raw edits hold a single token;
/// coalesced ones keep the position of the first token of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Equal {
        tokens: Vec<T>,
        a_pos: usize,
        b_pos: usize,
    },
    Delete {
        tokens: Vec<T>,
        a_pos: usize,
    },
    Insert {
        tokens: Vec<T>,
        b_pos: usize,
    },
}

/// A coalesced edit: a maximal run of same-operation edits.
pub type RevisionGroup<T> = Edit<T>;

impl<T> Edit<T> {
    pub fn equal(token: T, a_pos: usize, b_pos: usize) -> Self {
        Edit::Equal {
            tokens: vec![token],
            a_pos,
            b_pos,
        }
    }

    pub fn delete(token: T, a_pos: usize) -> Self {
        Edit::Delete {
            tokens: vec![token],
            a_pos,
        }
    }

    pub fn insert(token: T, b_pos: usize) -> Self {
        Edit::Insert {
            tokens: vec![token],
            b_pos,
        }
    }

    pub fn op(&self) -> EditOp {
        match self {
            Edit::Equal { .. } => EditOp::Equal,
            Edit::Delete { .. } => EditOp::Delete,
            Edit::Insert { .. } => EditOp::Insert,
        }
    }

    pub fn tokens(&self) -> &[T] {
        match self {
            Edit::Equal { tokens, .. } | Edit::Delete { tokens, .. } | Edit::Insert { tokens, .. } => {
                tokens
            }
        }
    }

    pub fn a_pos(&self) -> Option<usize> {
        match self {
            Edit::Equal { a_pos, .. } | Edit::Delete { a_pos, .. } => Some(*a_pos),
            Edit::Insert { .. } => None,
        }
    }

    pub fn b_pos(&self) -> Option<usize> {
        match self {
            Edit::Equal { b_pos, .. } | Edit::Insert { b_pos, .. } => Some(*b_pos),
            Edit::Delete { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut Vec<T> {
        match self {
            Edit::Equal { tokens, .. } | Edit::Delete { tokens, .. } | Edit::Insert { tokens, .. } => {
                tokens
            }
        }
    }

    pub(crate) fn into_tokens(self) -> Vec<T> {
        match self {
            Edit::Equal { tokens, .. } | Edit::Delete { tokens, .. } | Edit::Insert { tokens, .. } => {
                tokens
            }
        }
    }
}

impl<T: AsRef<str>> Edit<T> {
    /// The tokens of the run joined back into text.
    pub fn text(&self) -> String {
        self.tokens().iter().map(AsRef::as_ref).collect()
    }
}

impl<T: AsRef<str>> Display for Edit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.op().symbol(), self.text().escape_debug())
    }
}

/// Rebuilds the old sequence from the `Equal` and `Delete` runs of a script.
pub fn source_tokens<T>(edits: &[Edit<T>]) -> Vec<&T> {
    edits
        .iter()
        .filter(|edit| edit.op().touches_source())
        .flat_map(|edit| edit.tokens())
        .collect()
}

/// Rebuilds the new sequence from the `Equal` and `Insert` runs of a script.
pub fn target_tokens<T>(edits: &[Edit<T>]) -> Vec<&T> {
    edits
        .iter()
        .filter(|edit| edit.op().touches_target())
        .flat_map(|edit| edit.tokens())
        .collect()
}
