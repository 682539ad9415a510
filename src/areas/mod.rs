//! Inputs and outputs of a comparison
//!
//! - `document`: `.docx` archives and the XML parts inside them
//! - `session`: the output writer and locator shared by every command

pub mod document;
pub mod session;
