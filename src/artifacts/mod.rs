//! Comparison data structures and algorithms
//!
//! - `core`: Shared setup (logging)
//! - `diff`: Tokenizing, the LCS matrix, backtracking and coalescing
//! - `section`: Section markers, queries and the locator resolving them

pub mod core;
pub mod diff;
pub mod section;
