use std::ops::{Index, IndexMut};

/// Dense LCS length table of `(m + 1) x (n + 1)` cells, stored row-major.
///
/// `matrix[(i, j)]` is the length of the longest common subsequence of the
/// first `i` tokens of the old sequence and the first `j` tokens of the new
/// one. Row 0 and column 0 are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl LcsMatrix {
    fn zeroed(rows: usize, cols: usize) -> Self {
        LcsMatrix {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[usize] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// LCS length of the two complete sequences.
    pub fn lcs_len(&self) -> usize {
        self[(self.rows - 1, self.cols - 1)]
    }
}

impl Index<(usize, usize)> for LcsMatrix {
    type Output = usize;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.cells[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for LcsMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.cells[i * self.cols + j]
    }
}

/// Fills the LCS table for `seq1` against `seq2`.
pub fn build_matrix<T: PartialEq>(seq1: &[T], seq2: &[T]) -> LcsMatrix {
    let (m, n) = (seq1.len(), seq2.len());
    let mut matrix = LcsMatrix::zeroed(m + 1, n + 1);

    for i in 1..=m {
        for j in 1..=n {
            matrix[(i, j)] = if seq1[i - 1] == seq2[j - 1] {
                matrix[(i - 1, j - 1)] + 1
            } else {
                matrix[(i - 1, j)].max(matrix[(i, j - 1)])
            };
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn is_common_subsequence(candidate: &[u8], a: &[u8], b: &[u8]) -> bool {
        fn is_subsequence(candidate: &[u8], seq: &[u8]) -> bool {
            let mut rest = seq.iter();
            candidate.iter().all(|c| rest.any(|s| s == c))
        }
        is_subsequence(candidate, a) && is_subsequence(candidate, b)
    }

    fn brute_force_lcs(a: &[u8], b: &[u8]) -> usize {
        (0..1u32 << a.len())
            .map(|mask| {
                a.iter()
                    .enumerate()
                    .filter(|(idx, _)| mask & (1 << idx) != 0)
                    .map(|(_, c)| *c)
                    .collect::<Vec<_>>()
            })
            .filter(|candidate| is_common_subsequence(candidate, a, b))
            .map(|candidate| candidate.len())
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn empty_sequences_give_single_zero_cell() {
        let matrix = build_matrix::<&str>(&[], &[]);

        assert_eq!(matrix.rows(), 1);
        assert_eq!(matrix.cols(), 1);
        assert_eq!(matrix.row(0), &[0]);
        assert_eq!(matrix.lcs_len(), 0);
    }

    #[rstest]
    #[case(&["a", "b", "c"], &[])]
    #[case(&[], &["a", "b"])]
    fn one_empty_side_gives_all_zeros(#[case] seq1: &[&str], #[case] seq2: &[&str]) {
        let matrix = build_matrix(seq1, seq2);

        assert_eq!(matrix.rows(), seq1.len() + 1);
        assert_eq!(matrix.cols(), seq2.len() + 1);
        for i in 0..matrix.rows() {
            assert!(matrix.row(i).iter().all(|cell| *cell == 0));
        }
    }

    #[test]
    fn fills_rows_for_a_word_substitution() {
        let matrix = build_matrix(&["the", "quick", "fox"], &["the", "slow", "fox"]);

        assert_eq!(matrix.row(0), &[0, 0, 0, 0]);
        assert_eq!(matrix.row(1), &[0, 1, 1, 1]);
        assert_eq!(matrix.row(2), &[0, 1, 1, 1]);
        assert_eq!(matrix.row(3), &[0, 1, 1, 2]);
        assert_eq!(matrix.lcs_len(), 2);
    }

    #[test]
    fn identical_sequences_match_completely() {
        let seq = ["x", " ", "y", " ", "z"];
        let matrix = build_matrix(&seq, &seq);

        assert_eq!(matrix.lcs_len(), seq.len());
    }

    proptest! {
        #[test]
        fn prop_lcs_length_is_optimal(
            a in prop::collection::vec(0u8..4, 0..9),
            b in prop::collection::vec(0u8..4, 0..9),
        ) {
            prop_assert_eq!(build_matrix(&a, &b).lcs_len(), brute_force_lcs(&a, &b));
        }

        #[test]
        fn prop_cells_follow_the_recurrence(
            a in prop::collection::vec(0u8..3, 0..12),
            b in prop::collection::vec(0u8..3, 0..12),
        ) {
            let matrix = build_matrix(&a, &b);

            for j in 0..matrix.cols() {
                prop_assert_eq!(matrix[(0, j)], 0);
            }
            for i in 1..matrix.rows() {
                prop_assert_eq!(matrix[(i, 0)], 0);
                for j in 1..matrix.cols() {
                    let expected = if a[i - 1] == b[j - 1] {
                        matrix[(i - 1, j - 1)] + 1
                    } else {
                        matrix[(i - 1, j)].max(matrix[(i, j - 1)])
                    };
                    prop_assert_eq!(matrix[(i, j)], expected);
                    prop_assert!(matrix[(i, j)] >= matrix[(i - 1, j)]);
                    prop_assert!(matrix[(i, j)] >= matrix[(i, j - 1)]);
                }
            }
        }
    }
}
