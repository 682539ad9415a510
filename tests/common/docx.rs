use derive_new::new;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;
const NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Minimal WordprocessingML package: body paragraphs plus optional notes.
#[derive(Debug, Clone, new)]
pub struct DocxSpec {
    pub paragraphs: Vec<String>,
    /// Prefix bound to the WordprocessingML namespace, `None` for the default namespace
    #[new(value = "Some(\"w\".to_string())")]
    pub prefix: Option<String>,
    #[new(default)]
    pub footnotes: Vec<(String, String)>,
    #[new(default)]
    pub endnotes: Vec<(String, String)>,
}

impl DocxSpec {
    pub fn with_footnote(mut self, id: &str, text: &str) -> Self {
        self.footnotes.push((id.to_string(), text.to_string()));
        self
    }

    pub fn with_endnote(mut self, id: &str, text: &str) -> Self {
        self.endnotes.push((id.to_string(), text.to_string()));
        self
    }

    pub fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        self.prefix = prefix.map(str::to_string);
        self
    }

    fn tag(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{name}"),
            None => name.to_string(),
        }
    }

    fn namespace_declaration(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!(r#"xmlns:{prefix}="{NAMESPACE}""#),
            None => format!(r#"xmlns="{NAMESPACE}""#),
        }
    }

    fn paragraph(&self, text: &str) -> String {
        let (p, r, t) = (self.tag("p"), self.tag("r"), self.tag("t"));
        format!(r#"<{p}><{r}><{t} xml:space="preserve">{}</{t}></{r}></{p}>"#, escape(text))
    }

    fn root(&self, name: &str, body: &str) -> String {
        let root = self.tag(name);
        format!("<{root} {}>{body}</{root}>", self.namespace_declaration())
    }

    fn notes_part(&self, root: &str, element: &str, notes: &[(String, String)]) -> String {
        let (element, id) = (self.tag(element), self.tag("id"));
        let body = notes
            .iter()
            .map(|(note_id, text)| {
                format!(r#"<{element} {id}="{note_id}">{}</{element}>"#, self.paragraph(text))
            })
            .collect::<String>();
        self.root(root, &body)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn write_docx(path: &Path, package: &DocxSpec) {
    let file = std::fs::File::create(path)
        .unwrap_or_else(|e| panic!("Failed to create {:?}: {}", path, e));
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let body = package
        .paragraphs
        .iter()
        .map(|text| package.paragraph(text))
        .collect::<String>();
    let body_tag = package.tag("body");
    let mut parts = vec![
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        (
            "word/document.xml",
            package.root("document", &format!("<{body_tag}>{body}</{body_tag}>")),
        ),
    ];
    if !package.footnotes.is_empty() {
        parts.push((
            "word/footnotes.xml",
            package.notes_part("footnotes", "footnote", &package.footnotes),
        ));
    }
    if !package.endnotes.is_empty() {
        parts.push((
            "word/endnotes.xml",
            package.notes_part("endnotes", "endnote", &package.endnotes),
        ));
    }

    for (name, content) in parts {
        zip.start_file(name, options)
            .unwrap_or_else(|e| panic!("Failed to start {}: {}", name, e));
        zip.write_all(content.as_bytes())
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", name, e));
    }
    zip.finish()
        .unwrap_or_else(|e| panic!("Failed to finish {:?}: {}", path, e));
}
