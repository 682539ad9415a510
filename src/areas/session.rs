use crate::areas::document::DocxPackage;
use crate::artifacts::section::locator::{LocatedText, SectionLocator};
use crate::artifacts::section::query::{Query, QueryParser};
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Entry point of every command: owns the output writer and the locator.
pub struct Session {
    writer: RefCell<Box<dyn std::io::Write>>,
    locator: SectionLocator,
    queries: QueryParser,
}

impl Session {
    pub fn new(writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        Ok(Session {
            writer: RefCell::new(writer),
            locator: SectionLocator::try_new()?,
            queries: QueryParser::try_new()?,
        })
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn parse_query(&self, query: &str) -> Query {
        self.queries.parse(query)
    }

    /// Opens `path` and resolves `query` in it.
    pub fn locate(&self, path: &Path, query: &Query) -> anyhow::Result<Option<LocatedText>> {
        let mut package = DocxPackage::open(path)?;
        self.locator.locate_in_package(&mut package, query)
    }
}
