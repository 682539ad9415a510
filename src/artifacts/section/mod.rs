//! Section location inside WordprocessingML documents
//!
//! - `marker`: recognises numbering markers such as `3.1`, `(b)` or `iv.`
//! - `query`: parses human-typed queries (`section 3.1`, `footnote 5`, ...)
//! - `locator`: finds the text a query designates in a parsed document part

pub mod locator;
pub mod marker;
pub mod query;

/// Leading numbering marker followed by at least one whitespace character.
pub const SECTION_MARKER_REGEX: &str = r"^[\s\u{00A0}]*(\d+(?:\.\d+)*\.?|\([a-zA-Z]\)|\([ivxlcdm]+\)|[a-zA-Z]\.|[ivxlcdmIVXLCDM]+\.)[\s\u{00A0}]+";
pub const SECTION_QUERY_REGEX: &str = r"(?i)^section\s+(.+)$";
pub const PARAGRAPH_QUERY_REGEX: &str = r#"(?i)^para(?:graph)?\s+['"](.+)['"]$"#;
pub const FOOTNOTE_QUERY_REGEX: &str = r"(?i)^footnote\s+(\d+)$";
pub const ENDNOTE_QUERY_REGEX: &str = r"(?i)^endnote\s+(\d+)$";
pub const ELEMENT_QUERY_REGEX: &str = r#"(?i)^element\s+['"](.+)['"]$"#;

/// Characters allowed right after a section id for the id to count as a match.
pub const SECTION_ID_TERMINATORS: [char; 4] = [' ', '\t', '\n', '\u{00A0}'];
