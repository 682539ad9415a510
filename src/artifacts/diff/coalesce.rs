use crate::artifacts::diff::edit::{Edit, RevisionGroup};

/// Merges consecutive edits of the same operation into revision groups.
///
/// A group keeps the positions of the first edit in its run; later
/// positions are dropped. No two adjacent groups in the result share an
/// operation, so running the result through `coalesce` again is a no-op.
pub fn coalesce<T>(edits: impl IntoIterator<Item = Edit<T>>) -> Vec<RevisionGroup<T>> {
    let mut groups: Vec<RevisionGroup<T>> = Vec::new();

    for edit in edits {
        match groups.last_mut() {
            Some(group) if group.op() == edit.op() => {
                group.tokens_mut().extend(edit.into_tokens());
            }
            _ => groups.push(edit),
        }
    }

    groups
}

/// Counts describing how a raw script collapsed into revision groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalescingSummary {
    pub raw_edits: usize,
    pub groups: usize,
    pub transitions: usize,
}

impl CoalescingSummary {
    pub fn new<T>(raw: &[Edit<T>], groups: &[RevisionGroup<T>]) -> Self {
        let transitions = groups
            .windows(2)
            .filter(|pair| pair[0].op() != pair[1].op())
            .count();

        CoalescingSummary {
            raw_edits: raw.len(),
            groups: groups.len(),
            transitions,
        }
    }
}
