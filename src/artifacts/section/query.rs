use crate::artifacts::section::{
    ELEMENT_QUERY_REGEX, ENDNOTE_QUERY_REGEX, FOOTNOTE_QUERY_REGEX, PARAGRAPH_QUERY_REGEX,
    SECTION_QUERY_REGEX,
};
use anyhow::Context;
use regex::Regex;
use std::fmt;

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const FOOTNOTES_PART: &str = "word/footnotes.xml";
pub const ENDNOTES_PART: &str = "word/endnotes.xml";

/// What a human-typed query asks the locator to find.
///
/// Supported forms (keywords are case-insensitive):
/// - `section 3.1`: a numbered section and everything up to the next one
/// - `paragraph 'The quick'` or `para "The quick"`: the paragraph starting
///   with that text, up to the next numbered paragraph
/// - `footnote 5` / `endnote 3`: a note by id
/// - `element 'some text'`: the smallest element containing that text
///
/// Anything else is taken as a section id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Section(String),
    Paragraph(String),
    Footnote(String),
    Endnote(String),
    Element(String),
}

type QueryBuilder = fn(String) -> Query;

/// Compiled query grammar, tried form by form in a fixed order.
#[derive(Debug, Clone)]
pub struct QueryParser {
    forms: Vec<(Regex, QueryBuilder)>,
}

impl QueryParser {
    pub fn try_new() -> anyhow::Result<Self> {
        let forms: [(&str, QueryBuilder); 5] = [
            (SECTION_QUERY_REGEX, |id| Query::Section(id.trim().to_string())),
            (PARAGRAPH_QUERY_REGEX, Query::Paragraph),
            (FOOTNOTE_QUERY_REGEX, Query::Footnote),
            (ENDNOTE_QUERY_REGEX, Query::Endnote),
            (ELEMENT_QUERY_REGEX, Query::Element),
        ];

        let forms = forms
            .into_iter()
            .map(|(pattern, build)| {
                Regex::new(pattern)
                    .with_context(|| format!("invalid query regex: {pattern}"))
                    .map(|re| (re, build))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(QueryParser { forms })
    }

    /// Parses a typed query. Text matching none of the forms is a section id.
    pub fn parse(&self, query: &str) -> Query {
        let query = query.trim();

        self.forms
            .iter()
            .find_map(|(re, build)| {
                re.captures(query)
                    .and_then(|captures| captures.get(1))
                    .map(|value| build(value.as_str().to_string()))
            })
            .unwrap_or_else(|| Query::Section(query.to_string()))
    }
}

impl Query {
    /// The document part the query is resolved against.
    pub fn part_name(&self) -> &'static str {
        match self {
            Query::Footnote(_) => FOOTNOTES_PART,
            Query::Endnote(_) => ENDNOTES_PART,
            Query::Section(_) | Query::Paragraph(_) | Query::Element(_) => DOCUMENT_PART,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Section(id) => write!(f, "section '{id}'"),
            Query::Paragraph(text) => write!(f, "paragraph '{text}'"),
            Query::Footnote(id) => write!(f, "footnote {id}"),
            Query::Endnote(id) => write!(f, "endnote {id}"),
            Query::Element(text) => write!(f, "element '{text}'"),
        }
    }
}
