use crate::areas::document::{
    DocxPackage, ENDNOTE_ELEMENT, FOOTNOTE_ELEMENT, NodeId, PARAGRAPH_ELEMENT, XmlTree, pretty_xml,
};
use crate::artifacts::section::SECTION_ID_TERMINATORS;
use crate::artifacts::section::marker::MarkerMatcher;
use crate::artifacts::section::query::Query;
use std::ops::Range;
use tracing::debug;

/// Elements a query designated: their text and their markup, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedText {
    blocks: Vec<String>,
    fragments: Vec<String>,
}

impl LocatedText {
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Raw markup of each matched element.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// The blocks joined with single spaces, ready for tokenizing.
    pub fn joined(&self) -> String {
        self.blocks.join(" ")
    }

    /// Every fragment re-indented, one after the other.
    pub fn pretty_xml(&self) -> anyhow::Result<String> {
        let fragments = self
            .fragments
            .iter()
            .map(|fragment| pretty_xml(fragment))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(fragments.join("\n"))
    }

    fn from_nodes(tree: &XmlTree, nodes: &[NodeId]) -> Option<Self> {
        if nodes.is_empty() {
            return None;
        }

        Some(LocatedText {
            blocks: nodes.iter().map(|id| tree.text_of(*id)).collect(),
            fragments: nodes.iter().map(|id| tree.outer_xml(*id)).collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SectionLocator {
    markers: MarkerMatcher,
}

impl SectionLocator {
    pub fn try_new() -> anyhow::Result<Self> {
        Ok(SectionLocator {
            markers: MarkerMatcher::try_new()?,
        })
    }

    /// Resolves `query` against the part of `package` it targets.
    ///
    /// A missing part is reported like a missing match, as `Ok(None)`.
    pub fn locate_in_package(
        &self,
        package: &mut DocxPackage,
        query: &Query,
    ) -> anyhow::Result<Option<LocatedText>> {
        let located = match package.read_tree(query.part_name())? {
            Some(tree) => self.locate(&tree, query),
            None => None,
        };

        debug!(
            path = %package.path().display(),
            %query,
            blocks = located.as_ref().map_or(0, |text| text.blocks().len()),
            "located query"
        );

        Ok(located)
    }

    pub fn locate(&self, tree: &XmlTree, query: &Query) -> Option<LocatedText> {
        let nodes = match query {
            Query::Section(id) => {
                let (paragraphs, texts) = paragraphs(tree);
                self.find_section(&texts, id)
                    .map(|range| paragraphs[range].to_vec())
            }
            Query::Paragraph(text) => {
                let (paragraphs, texts) = paragraphs(tree);
                self.find_paragraph(&texts, text)
                    .map(|range| paragraphs[range].to_vec())
            }
            Query::Footnote(id) => find_note(tree, FOOTNOTE_ELEMENT, id).map(|node| vec![node]),
            Query::Endnote(id) => find_note(tree, ENDNOTE_ELEMENT, id).map(|node| vec![node]),
            Query::Element(text) => find_element(tree, text).map(|node| vec![node]),
        }?;

        LocatedText::from_nodes(tree, &nodes)
    }

    /// Indices of the paragraph opening section `section_id` and of every
    /// paragraph after it, up to the first one whose marker closes the section.
    pub fn find_section<S: AsRef<str>>(
        &self,
        paragraphs: &[S],
        section_id: &str,
    ) -> Option<Range<usize>> {
        let paragraphs = as_strs(paragraphs);
        let section_id = section_id.to_lowercase();
        let start = paragraphs
            .iter()
            .position(|text| opens_section(text, &section_id))?;
        let start_marker = self.markers.detect(paragraphs[start]);

        let len = paragraphs[start + 1..]
            .iter()
            .take_while(|text| {
                self.markers
                    .detect(text)
                    .is_none_or(|marker| !marker.ends_section(start_marker.as_ref()))
            })
            .count();

        Some(start..start + 1 + len)
    }

    /// Indices of the first paragraph starting with `search` and of the
    /// paragraphs after it, up to the next one carrying any section marker.
    pub fn find_paragraph<S: AsRef<str>>(
        &self,
        paragraphs: &[S],
        search: &str,
    ) -> Option<Range<usize>> {
        let paragraphs = as_strs(paragraphs);
        let search = search.to_lowercase();
        let start = paragraphs
            .iter()
            .position(|text| text.to_lowercase().trim_start().starts_with(&search))?;

        let len = paragraphs[start + 1..]
            .iter()
            .take_while(|text| !self.markers.is_section_start(text))
            .count();

        Some(start..start + 1 + len)
    }
}

fn as_strs<S: AsRef<str>>(paragraphs: &[S]) -> Vec<&str> {
    paragraphs.iter().map(|text| text.as_ref()).collect()
}

fn paragraphs(tree: &XmlTree) -> (Vec<NodeId>, Vec<String>) {
    tree.elements_named(PARAGRAPH_ELEMENT)
        .map(|id| (id, tree.text_of(id)))
        .unzip()
}

/// Whether `text` starts with the (already lowercased) section id, followed
/// by the end of the text or a separator.
fn opens_section(text: &str, section_id: &str) -> bool {
    text.trim_start()
        .to_lowercase()
        .strip_prefix(section_id)
        .is_some_and(|rest| {
            rest.chars()
                .next()
                .is_none_or(|next| SECTION_ID_TERMINATORS.contains(&next))
        })
}

fn find_note(tree: &XmlTree, element: &str, note_id: &str) -> Option<NodeId> {
    tree.elements_named(element)
        .find(|id| tree.node(*id).id() == Some(note_id))
}

/// The element with the fewest descendants whose text contains `search`,
/// ignoring case. Ties go to the first element in document order.
fn find_element(tree: &XmlTree, search: &str) -> Option<NodeId> {
    let search = search.to_lowercase();

    tree.ids()
        .filter(|id| tree.text_of(*id).to_lowercase().contains(&search))
        .min_by_key(|id| tree.descendant_count(*id))
}
