use crate::artifacts::diff::edit::{Edit, EditOp};
use crate::artifacts::diff::matrix::LcsMatrix;
use tracing::trace;

/// One move of the backward walk: the cell it was taken from and the raw
/// edit it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktrackStep<T> {
    pub cell: (usize, usize),
    pub edit: Edit<T>,
}

/// Walks `matrix` from its bottom-right cell back to the origin.
///
/// The steps come out in walk order, i.e. last token first. At every cell:
///
/// - matching tokens move diagonally and emit `Equal`;
/// - otherwise the walk moves left (`Insert`) whenever the cell to the left
///   holds at least as much as the cell above, so ties favour insertions;
/// - otherwise it moves up (`Delete`).
///
/// `matrix` must have been built from `seq1` and `seq2`.
pub fn backtrack_steps<T: PartialEq + Clone>(
    matrix: &LcsMatrix,
    seq1: &[T],
    seq2: &[T],
) -> Vec<BacktrackStep<T>> {
    debug_assert_eq!(matrix.rows(), seq1.len() + 1);
    debug_assert_eq!(matrix.cols(), seq2.len() + 1);

    let (mut i, mut j) = (seq1.len(), seq2.len());
    let mut steps = Vec::with_capacity(i + j);

    while i > 0 || j > 0 {
        let cell = (i, j);

        let edit = if i > 0 && j > 0 && seq1[i - 1] == seq2[j - 1] {
            i -= 1;
            j -= 1;
            Edit::equal(seq1[i].clone(), i, j)
        } else if j > 0 && (i == 0 || matrix[(i, j - 1)] >= matrix[(i - 1, j)]) {
            j -= 1;
            Edit::insert(seq2[j].clone(), j)
        } else {
            i -= 1;
            Edit::delete(seq1[i].clone(), i)
        };

        trace!(i = cell.0, j = cell.1, op = ?edit.op(), "backtrack step");
        steps.push(BacktrackStep { cell, edit });
    }

    steps
}

/// Produces the raw edit script (one edit per token) in document order.
pub fn backtrack<T: PartialEq + Clone>(matrix: &LcsMatrix, seq1: &[T], seq2: &[T]) -> Vec<Edit<T>> {
    let mut edits = backtrack_steps(matrix, seq1, seq2)
        .into_iter()
        .map(|step| step.edit)
        .collect::<Vec<_>>();
    edits.reverse();
    edits
}

/// Label used by the trace printer for the kind of move a step made.
pub fn step_label(op: EditOp) -> &'static str {
    match op {
        EditOp::Equal => "MATCH",
        EditOp::Delete => "DELETE",
        EditOp::Insert => "INSERT",
    }
}
