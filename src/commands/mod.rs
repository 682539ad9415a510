//! Command implementations
//!
//! Each command is an `impl Session` block writing to the session's writer:
//!
//! - `trace`: step-by-step LCS trace between two texts or two document sections
//! - `extract`: prints the text blocks a query designates in one or more documents

pub mod extract;
pub mod trace;
