use anyhow::Context;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader, Writer};
use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Namespace of the WordprocessingML vocabulary, whatever prefix a part binds it to.
pub const WORDML_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const PARAGRAPH_ELEMENT: &str = "p";
pub const TEXT_ELEMENT: &str = "t";
pub const FOOTNOTE_ELEMENT: &str = "footnote";
pub const ENDNOTE_ELEMENT: &str = "endnote";
pub const ID_ATTRIBUTE: &str = "id";
const PRETTY_INDENT: usize = 2;

/// A `.docx` archive opened for reading parts.
pub struct DocxPackage {
    path: Box<Path>,
    archive: ZipArchive<File>,
}

impl DocxPackage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("file not found: {}", path.display()))?;
        let archive = ZipArchive::new(file)
            .with_context(|| format!("{} is not a valid DOCX file", path.display()))?;

        Ok(DocxPackage {
            path: path.into(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads a part by name, falling back to the name without its `word/`
    /// prefix. Returns `None` when neither exists.
    pub fn read_part(&mut self, name: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let fallback = name.replace("word/", "");

        for candidate in [name, fallback.as_str()] {
            match self.archive.by_name(candidate) {
                Ok(mut entry) => {
                    let mut bytes = Vec::new();
                    entry.read_to_end(&mut bytes).with_context(|| {
                        format!("failed to read {candidate} from {}", self.path.display())
                    })?;
                    return Ok(Some(bytes));
                }
                Err(ZipError::FileNotFound) => continue,
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("failed to open {candidate} in {}", self.path.display())
                    });
                }
            }
        }

        Ok(None)
    }

    pub fn read_tree(&mut self, name: &str) -> anyhow::Result<Option<XmlTree>> {
        match self.read_part(name)? {
            Some(bytes) => {
                let tree = XmlTree::parse(&bytes)
                    .with_context(|| format!("malformed {name} in {}", self.path.display()))?;
                Ok(Some(tree))
            }
            None => Ok(None),
        }
    }
}

pub type NodeId = usize;

/// An element of a parsed part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    namespace: Option<String>,
    local_name: String,
    id: Option<String>,
    text: Option<String>,
    end: NodeId,
    span: Range<usize>,
}

impl XmlNode {
    /// Value of the WordprocessingML `id` attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether this is the WordprocessingML element `local_name`.
    pub fn is_wordml(&self, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(WORDML_NAMESPACE) && self.local_name == local_name
    }
}

/// Elements of an XML part in document (pre-)order.
///
/// The subtree of node `n` is the contiguous range `n..end`, so descendants
/// never need to be walked recursively. Each node also remembers the bytes
/// of its markup in the source part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlTree {
    source: Vec<u8>,
    nodes: Vec<XmlNode>,
}

impl XmlTree {
    pub fn parse(xml: &[u8]) -> anyhow::Result<Self> {
        let mut reader = NsReader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut nodes: Vec<XmlNode> = Vec::new();
        let mut open: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    // `<` + content + `>`
                    let tag_start = byte_position(&reader) - e.len() - 2;
                    nodes.push(Self::node_from(&reader, &e, tag_start)?);
                    open.push(nodes.len() - 1);
                }
                Event::Empty(e) => {
                    // `<` + content + `/>`
                    let tag_start = byte_position(&reader) - e.len() - 3;
                    let mut node = Self::node_from(&reader, &e, tag_start)?;
                    node.end = nodes.len() + 1;
                    node.span.end = byte_position(&reader);
                    nodes.push(node);
                }
                Event::End(_) => {
                    if let Some(id) = open.pop() {
                        nodes[id].end = nodes.len();
                        nodes[id].span.end = byte_position(&reader);
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    Self::append_text(&mut nodes, &open, &text);
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    Self::append_text(&mut nodes, &open, &text);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        for id in open {
            nodes[id].end = nodes.len();
            nodes[id].span.end = xml.len();
        }

        Ok(XmlTree {
            source: xml.to_vec(),
            nodes,
        })
    }

    fn node_from(
        reader: &NsReader<&[u8]>,
        e: &BytesStart,
        tag_start: usize,
    ) -> anyhow::Result<XmlNode> {
        let (namespace, local_name) = reader.resolve_element(e.name());

        let mut id = None;
        for attribute in e.attributes() {
            let attribute = attribute?;
            let (attribute_ns, attribute_name) = reader.resolve_attribute(attribute.key);
            let is_id = attribute_name.as_ref() == ID_ATTRIBUTE.as_bytes();
            if is_id && is_wordml_namespace(&attribute_ns) {
                id = Some(attribute.unescape_value()?.into_owned());
            }
        }

        Ok(XmlNode {
            namespace: match namespace {
                ResolveResult::Bound(Namespace(uri)) => {
                    Some(String::from_utf8_lossy(uri).into_owned())
                }
                _ => None,
            },
            local_name: String::from_utf8_lossy(local_name.as_ref()).into_owned(),
            id,
            text: None,
            end: 0,
            span: tag_start..tag_start,
        })
    }

    fn append_text(nodes: &mut [XmlNode], open: &[NodeId], text: &str) {
        if let Some(&current) = open.last() {
            let node = &mut nodes[current];
            if node.is_wordml(TEXT_ELEMENT) {
                node.text.get_or_insert_with(String::new).push_str(text);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id]
    }

    /// Ids of all elements, in document order.
    pub fn ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len()
    }

    /// Ids of the WordprocessingML elements named `local_name`, in document order.
    pub fn elements_named<'t>(&'t self, local_name: &'t str) -> impl Iterator<Item = NodeId> + 't {
        self.ids().filter(move |id| self.nodes[*id].is_wordml(local_name))
    }

    /// Number of elements below `id`.
    pub fn descendant_count(&self, id: NodeId) -> usize {
        self.nodes[id].end - id - 1
    }

    /// Concatenated `w:t` text inside `id`, the element itself included.
    pub fn text_of(&self, id: NodeId) -> String {
        self.nodes[id..self.nodes[id].end]
            .iter()
            .filter_map(|node| node.text.as_deref())
            .collect()
    }

    /// The markup of `id` exactly as it appears in the part.
    pub fn outer_xml(&self, id: NodeId) -> String {
        String::from_utf8_lossy(&self.source[self.nodes[id].span.clone()]).into_owned()
    }
}

fn byte_position(reader: &NsReader<&[u8]>) -> usize {
    reader.buffer_position() as usize
}

fn is_wordml_namespace(result: &ResolveResult) -> bool {
    matches!(result, ResolveResult::Bound(Namespace(uri)) if *uri == WORDML_NAMESPACE.as_bytes())
}

/// Re-indents an XML fragment, one element per line.
///
/// Whitespace-only text between elements is dropped; other text is kept
/// verbatim, so `w:t` content keeps its spaces.
pub fn pretty_xml(fragment: &str) -> anyhow::Result<String> {
    let mut reader = Reader::from_str(fragment);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', PRETTY_INDENT);

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => {}
            event => writer
                .write_event(event)
                .context("failed to write XML fragment")?,
        }
    }

    Ok(String::from_utf8(writer.into_inner())?)
}
