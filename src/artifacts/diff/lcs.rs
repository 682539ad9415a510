use crate::artifacts::diff::backtrack::backtrack;
use crate::artifacts::diff::coalesce::coalesce;
use crate::artifacts::diff::edit::Edit;
use crate::artifacts::diff::matrix::{LcsMatrix, build_matrix};
use derive_new::new;
use tracing::debug;

pub trait DiffAlgorithm<T> {
    type Table;
    type EditScript;

    fn build_table(&self) -> Self::Table;
    fn backtrack(&self, table: &Self::Table) -> Self::EditScript;
    /// Collapses a raw script from `backtrack` into revision groups.
    fn revision_groups(&self, raw: Self::EditScript) -> Self::EditScript;

    fn diff(&self) -> Self::EditScript {
        let table = self.build_table();
        self.backtrack(&table)
    }
}

/// Longest-common-subsequence diff of two borrowed token sequences.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LcsDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<T: Eq + Clone> DiffAlgorithm<T> for LcsDiff<'_, T> {
    type Table = LcsMatrix;
    type EditScript = Vec<Edit<T>>;

    fn build_table(&self) -> Self::Table {
        let matrix = build_matrix(self.a, self.b);
        debug!(
            old_len = self.a.len(),
            new_len = self.b.len(),
            lcs_len = matrix.lcs_len(),
            "built LCS matrix"
        );
        matrix
    }

    fn backtrack(&self, table: &Self::Table) -> Self::EditScript {
        backtrack(table, self.a, self.b)
    }

    fn revision_groups(&self, raw: Self::EditScript) -> Self::EditScript {
        let raw_len = raw.len();
        let groups = coalesce(raw);
        debug!(raw_edits = raw_len, groups = groups.len(), "coalesced edit script");
        groups
    }
}
