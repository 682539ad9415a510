//! Token alignment and revision grouping
//!
//! This module implements the comparison pipeline, leaves first:
//!
//! - `tokenizer`: splits text into word or character tokens, keeping whitespace
//! - `matrix`: longest-common-subsequence length table
//! - `backtrack`: walks the table into a raw, position-tagged edit script
//! - `coalesce`: merges same-operation runs into revision groups
//! - `lcs`: the `DiffAlgorithm` driver chaining the steps above
//!
//! Every step is a pure function of its inputs. The matrix needs
//! `O(m * n)` memory, which is the practical size limit of a comparison.

pub mod backtrack;
pub mod coalesce;
pub mod edit;
pub mod lcs;
pub mod matrix;
pub mod tokenizer;
