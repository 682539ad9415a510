use crate::artifacts::section::SECTION_MARKER_REGEX;
use anyhow::Context;
use derive_new::new;
use regex::Regex;

const ALPHA_LEVEL: usize = 10;
const ROMAN_LEVEL: usize = 11;
const MAJOR_NUMERIC_LEVEL: usize = 2;

/// The numbering scheme a marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `1`, `1.2`, `1.2.3.`
    Numeric,
    /// `(a)`, `(B)`
    AlphaParen,
    /// `(iv)`
    RomanParen,
    /// `a.`, `B.`
    AlphaDot,
    /// `iv.`, `XII.`
    RomanDot,
}

/// A numbering marker found at the start of a paragraph.
///
/// Numeric markers take their depth from the number of components
/// (`3.1` is level 2); lettered markers sit at level 10 and roman ones at
/// level 11, below any numeric heading.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SectionMarker {
    kind: MarkerKind,
    level: usize,
    label: String,
}

impl SectionMarker {
    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Classifies a marker label matched by [`SECTION_MARKER_REGEX`].
    fn classify(label: &str) -> Self {
        let (kind, level) = if let Some(inner) = label.strip_prefix('(') {
            let inner = inner.trim_end_matches(')');
            if inner.chars().count() == 1 && inner.chars().all(|c| c.is_ascii_alphabetic()) {
                (MarkerKind::AlphaParen, ALPHA_LEVEL)
            } else {
                (MarkerKind::RomanParen, ROMAN_LEVEL)
            }
        } else if label.starts_with(|c: char| c.is_ascii_alphabetic()) {
            if label.chars().count() == 2 {
                (MarkerKind::AlphaDot, ALPHA_LEVEL)
            } else {
                (MarkerKind::RomanDot, ROMAN_LEVEL)
            }
        } else {
            let depth = label.trim_end_matches('.').matches('.').count() + 1;
            (MarkerKind::Numeric, depth)
        };

        SectionMarker::new(kind, level, label.to_string())
    }

    /// Whether a paragraph carrying this marker closes a section opened by
    /// `start` (`None` when the opening paragraph had no marker).
    ///
    /// A section ends at a marker of the same kind and the same or a
    /// shallower level, or at any numeric marker of level 2 or less.
    pub fn ends_section(&self, start: Option<&SectionMarker>) -> bool {
        let same_kind_not_deeper =
            start.is_some_and(|start| start.kind == self.kind && self.level <= start.level);
        let major_numeric = self.kind == MarkerKind::Numeric && self.level <= MAJOR_NUMERIC_LEVEL;

        same_kind_not_deeper || major_numeric
    }
}

/// Compiled section marker grammar.
#[derive(Debug, Clone)]
pub struct MarkerMatcher {
    pattern: Regex,
}

impl MarkerMatcher {
    pub fn try_new() -> anyhow::Result<Self> {
        let pattern = Regex::new(SECTION_MARKER_REGEX)
            .with_context(|| format!("invalid section marker regex: {SECTION_MARKER_REGEX}"))?;

        Ok(MarkerMatcher { pattern })
    }

    pub fn detect(&self, text: &str) -> Option<SectionMarker> {
        self.pattern
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|label| SectionMarker::classify(label.as_str()))
    }

    pub fn is_section_start(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}
