use crate::areas::session::Session;
use crate::artifacts::section::locator::LocatedText;
use anyhow::Context;
use colored::Colorize;
use similar::TextDiff;
use std::path::{Path, PathBuf};

const DIFF_CONTEXT_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractFormat {
    /// The matched elements' markup, re-indented
    #[default]
    Xml,
    /// The matched blocks' text, one block per line
    Text,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub format: ExtractFormat,
    /// Print a unified diff of the two extractions instead of both of them
    pub diff: bool,
    pub output: Option<PathBuf>,
}

impl ExtractFormat {
    pub fn render(&self, located: &LocatedText) -> anyhow::Result<String> {
        match self {
            ExtractFormat::Xml => located.pretty_xml(),
            ExtractFormat::Text => Ok(located.blocks().join("\n")),
        }
    }
}

impl Session {
    /// Resolves `query` in every file and prints what it designates.
    ///
    /// With more than one file every result is preceded by a header naming
    /// the file, unless `options.diff` asks for a unified diff of the first two.
    pub fn extract(
        &self,
        files: &[PathBuf],
        query: &str,
        options: &ExtractOptions,
    ) -> anyhow::Result<()> {
        let query = self.parse_query(query);

        let extractions = files
            .iter()
            .map(|path| {
                let located = self.locate(path, &query)?.ok_or_else(|| {
                    anyhow::anyhow!("no match found for: {query} in {}", path.display())
                })?;

                Ok((path.as_path(), options.format.render(&located)?))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let to_terminal = options.output.is_none();
        let report = match extractions.as_slice() {
            [(old_path, old), (new_path, new), ..] if options.diff => {
                unified_diff(old_path, old, new_path, new)
            }
            [(_, single)] => single.clone(),
            _ => with_headers(&extractions, to_terminal),
        };

        match &options.output {
            Some(path) => {
                std::fs::write(path, format!("{report}\n"))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                writeln!(self.writer(), "Written to {}", path.display())?;
            }
            None => writeln!(self.writer(), "{report}")?,
        }

        Ok(())
    }
}

fn with_headers(extractions: &[(&Path, String)], bold: bool) -> String {
    extractions
        .iter()
        .map(|(path, body)| {
            let header = format!("=== {} ===", path.display());
            let header = if bold {
                header.bold().to_string()
            } else {
                header
            };
            format!("{header}\n{body}")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Line diff of two extractions, headed by the paths they came from.
///
/// Identical extractions give an empty string.
fn unified_diff(old_path: &Path, old: &str, new_path: &Path, new: &str) -> String {
    let old = format!("{old}\n");
    let new = format!("{new}\n");

    TextDiff::from_lines(&old, &new)
        .unified_diff()
        .context_radius(DIFF_CONTEXT_LINES)
        .header(&old_path.display().to_string(), &new_path.display().to_string())
        .to_string()
        .trim_end_matches('\n')
        .to_string()
}
