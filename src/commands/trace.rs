use crate::areas::session::Session;
use crate::artifacts::diff::backtrack::{backtrack_steps, step_label};
use crate::artifacts::diff::coalesce::CoalescingSummary;
use crate::artifacts::diff::edit::{Edit, EditOp};
use crate::artifacts::diff::lcs::{DiffAlgorithm, LcsDiff};
use crate::artifacts::diff::matrix::LcsMatrix;
use crate::artifacts::diff::tokenizer::{TokenizeMode, tokenize};
use colored::{ColoredString, Colorize};
use std::path::PathBuf;

pub const DEFAULT_MAX_MATRIX_TOKENS: usize = 20;
pub const DEFAULT_MAX_SIDE_BY_SIDE: usize = 30;
const INPUT_PREVIEW_CHARS: usize = 100;
const MATRIX_CELL_WIDTH: usize = 8;
const EQUAL_PREVIEW_CHARS: usize = 50;
const SIDE_BY_SIDE_CHARS: usize = 35;
const SIDE_BY_SIDE_WIDTH: usize = 40;

/// Where the two texts of a trace come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceInput {
    Text {
        old: String,
        new: String,
    },
    Documents {
        old: PathBuf,
        new: PathBuf,
        query: String,
    },
}

impl TraceInput {
    /// Reads `first` and `second` as raw text when `text` is set, as document
    /// paths otherwise. Documents need a query.
    pub fn from_args(
        first: String,
        second: String,
        query: Option<String>,
        text: bool,
    ) -> anyhow::Result<Self> {
        if text {
            return Ok(TraceInput::Text {
                old: first,
                new: second,
            });
        }

        let Some(query) = query else {
            anyhow::bail!("a section query is required when comparing documents");
        };

        Ok(TraceInput::Documents {
            old: PathBuf::from(first),
            new: PathBuf::from(second),
            query,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceOptions {
    pub mode: TokenizeMode,
    pub show_matrix: bool,
    pub show_backtrack: bool,
    pub coalesce: bool,
    pub max_matrix_tokens: usize,
    pub max_side_by_side: usize,
}

impl Default for TraceOptions {
    fn default() -> Self {
        TraceOptions {
            mode: TokenizeMode::Word,
            show_matrix: false,
            show_backtrack: false,
            coalesce: true,
            max_matrix_tokens: DEFAULT_MAX_MATRIX_TOKENS,
            max_side_by_side: DEFAULT_MAX_SIDE_BY_SIDE,
        }
    }
}

impl Session {
    pub fn trace(&self, input: &TraceInput, options: &TraceOptions) -> anyhow::Result<()> {
        let (old, new) = self.resolve_texts(input)?;

        let a = tokenize(&old, options.mode);
        let b = tokenize(&new, options.mode);
        writeln!(
            self.writer(),
            "{} comparison: {} vs {} {}",
            options.mode.level_name(),
            a.len(),
            b.len(),
            options.mode.unit_name()
        )?;
        self.print_inputs(&old, &new)?;

        let diff = LcsDiff::new(&a, &b);
        let matrix = diff.build_table();
        writeln!(self.writer(), "\nLCS length: {}", matrix.lcs_len())?;

        if options.show_matrix {
            if a.len() <= options.max_matrix_tokens && b.len() <= options.max_matrix_tokens {
                self.print_matrix(&matrix, &a, &b)?;
            } else {
                writeln!(
                    self.writer(),
                    "\n(Matrix too large to display: {}x{})",
                    matrix.rows(),
                    matrix.cols()
                )?;
            }
        }

        if options.show_backtrack {
            self.print_backtrack(&matrix, &a, &b)?;
        }

        let raw = diff.backtrack(&matrix);
        if !options.coalesce {
            return self.print_edit_script(&raw, "RAW EDIT SCRIPT");
        }

        let groups = diff.revision_groups(raw.clone());
        self.print_edit_script(&groups, "COALESCED EDIT SCRIPT")?;
        self.print_coalescing_analysis(&raw, &groups)?;

        if groups.len() <= options.max_side_by_side {
            self.print_side_by_side(&groups)?;
        }

        Ok(())
    }

    fn resolve_texts(&self, input: &TraceInput) -> anyhow::Result<(String, String)> {
        match input {
            TraceInput::Text { old, new } => Ok((old.clone(), new.clone())),
            TraceInput::Documents { old, new, query } => {
                let query = self.parse_query(query);
                let mut texts = Vec::with_capacity(2);

                for path in [old, new] {
                    let located = self.locate(path, &query)?.ok_or_else(|| {
                        anyhow::anyhow!("could not find {} in {}", query, path.display())
                    })?;
                    texts.push(located.joined());
                }

                let new = texts.pop().unwrap_or_default();
                let old = texts.pop().unwrap_or_default();
                Ok((old, new))
            }
        }
    }

    fn print_inputs(&self, old: &str, new: &str) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "\n=== INPUT ===")?;
        for (label, text) in [("Text 1", old), ("Text 2", new)] {
            let preview = text.chars().take(INPUT_PREVIEW_CHARS).collect::<String>();
            let ellipsis = if text.chars().count() > INPUT_PREVIEW_CHARS {
                "..."
            } else {
                ""
            };
            writeln!(writer, "{label}: {preview:?}{ellipsis}")?;
        }

        Ok(())
    }

    fn print_matrix(&self, matrix: &LcsMatrix, a: &[&str], b: &[&str]) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "\n=== LCS MATRIX ===")?;

        let header = format!(
            "        {}",
            b.iter()
                .map(|token| format!("{:>8}", truncate(token, MATRIX_CELL_WIDTH)))
                .collect::<Vec<_>>()
                .join(" ")
        );
        writeln!(writer, "{header}")?;
        writeln!(
            writer,
            "    {}",
            "-".repeat(header.chars().count().saturating_sub(4))
        )?;

        for i in 0..matrix.rows() {
            let label = match i {
                0 => "    ".to_string(),
                _ => format!("{:>4}", truncate(a[i - 1], MATRIX_CELL_WIDTH)),
            };
            let values = matrix
                .row(i)
                .iter()
                .map(|value| format!("{value:>8}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "{label}|{values}")?;
        }

        Ok(())
    }

    fn print_backtrack(&self, matrix: &LcsMatrix, a: &[&str], b: &[&str]) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "\n=== BACKTRACK TRACE ===")?;
        writeln!(
            writer,
            "Starting at matrix[{}][{}] = {}",
            a.len(),
            b.len(),
            matrix.lcs_len()
        )?;

        for step in backtrack_steps(matrix, a, b) {
            let (i, j) = step.cell;
            let token = step.edit.tokens().concat();
            let label = paint(step.edit.op(), step_label(step.edit.op()));
            writeln!(writer, "  [{i},{j}] {label}: {token:?}")?;
        }

        Ok(())
    }

    fn print_edit_script(&self, edits: &[Edit<&str>], title: &str) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "\n=== {title} ===")?;
        for edit in edits {
            let symbol = paint(edit.op(), &edit.op().symbol().to_string());
            writeln!(writer, "  {symbol} {}", edit.text().escape_debug())?;
        }

        Ok(())
    }

    fn print_coalescing_analysis(
        &self,
        raw: &[Edit<&str>],
        groups: &[Edit<&str>],
    ) -> anyhow::Result<()> {
        let summary = CoalescingSummary::new(raw, groups);
        let mut writer = self.writer();

        writeln!(writer, "\n=== COALESCING ANALYSIS ===")?;
        writeln!(writer, "Raw operations: {}", summary.raw_edits)?;
        writeln!(writer, "Coalesced groups: {}", summary.groups)?;
        writeln!(writer, "\nRevision groups that would be created:")?;

        for (idx, group) in groups.iter().enumerate() {
            let text = group.text().escape_debug().to_string();
            match group.op() {
                EditOp::Delete => writeln!(writer, "  {} #{idx}: {text}", "<w:del>".red())?,
                EditOp::Insert => writeln!(writer, "  {} #{idx}: {text}", "<w:ins>".green())?,
                EditOp::Equal => {
                    let preview = text.chars().take(EQUAL_PREVIEW_CHARS).collect::<String>();
                    let ellipsis = if text.chars().count() > EQUAL_PREVIEW_CHARS {
                        "..."
                    } else {
                        ""
                    };
                    writeln!(writer, "  (equal) #{idx}: {preview}{ellipsis}")?
                }
            }
        }

        writeln!(writer, "\nOperation transitions: {}", summary.transitions)?;

        Ok(())
    }

    fn print_side_by_side(&self, groups: &[Edit<&str>]) -> anyhow::Result<()> {
        let mut writer = self.writer();
        let width = SIDE_BY_SIDE_WIDTH;

        writeln!(writer, "\n=== SIDE-BY-SIDE ALIGNMENT ===")?;
        writeln!(writer, "{:<width$} | {:<width$} | Op", "Original", "Modified")?;
        writeln!(writer, "{}", "-".repeat(85))?;

        for group in groups {
            let text = group
                .text()
                .escape_debug()
                .to_string()
                .chars()
                .take(SIDE_BY_SIDE_CHARS)
                .collect::<String>();
            let (original, modified) = match group.op() {
                EditOp::Equal => (text.as_str(), text.as_str()),
                EditOp::Delete => (text.as_str(), ""),
                EditOp::Insert => ("", text.as_str()),
            };
            let symbol = paint(group.op(), &group.op().symbol().to_string());
            writeln!(writer, "{original:<width$} | {modified:<width$} | {symbol}")?;
        }

        Ok(())
    }
}

fn paint(op: EditOp, text: &str) -> ColoredString {
    match op {
        EditOp::Equal => text.normal(),
        EditOp::Delete => text.red(),
        EditOp::Insert => text.green(),
    }
}

/// Escaped token cut down to `width` characters for matrix headers.
fn truncate(token: &str, width: usize) -> String {
    let escaped = token.escape_debug().to_string();
    if escaped.chars().count() <= width {
        escaped
    } else {
        let head = escaped.chars().take(width - 2).collect::<String>();
        format!("{head}..")
    }
}
