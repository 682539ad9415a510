/// Characters that separate words. Each one becomes a token of its own.
pub const WORD_SEPARATORS: [char; 5] = [' ', '\t', '\n', '\r', '\u{00A0}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenizeMode {
    /// Runs of non-separator characters, with every separator kept as a token
    #[default]
    Word,
    /// One token per character
    Char,
}

impl TokenizeMode {
    pub fn level_name(&self) -> &'static str {
        match self {
            TokenizeMode::Word => "Word-level",
            TokenizeMode::Char => "Character-level",
        }
    }

    pub fn unit_name(&self) -> &'static str {
        match self {
            TokenizeMode::Word => "tokens",
            TokenizeMode::Char => "chars",
        }
    }
}

/// Splits `text` into comparison units borrowed from it.
///
/// Concatenating the result always gives back `text`.
pub fn tokenize(text: &str, mode: TokenizeMode) -> Vec<&str> {
    match mode {
        TokenizeMode::Word => tokenize_words(text),
        TokenizeMode::Char => tokenize_chars(text),
    }
}

fn tokenize_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start = None;

    for (idx, ch) in text.char_indices() {
        if WORD_SEPARATORS.contains(&ch) {
            if let Some(start) = word_start.take() {
                tokens.push(&text[start..idx]);
            }
            tokens.push(&text[idx..idx + ch.len_utf8()]);
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }

    if let Some(start) = word_start {
        tokens.push(&text[start..]);
    }

    tokens
}

fn tokenize_chars(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(idx, ch)| &text[idx..idx + ch.len_utf8()])
        .collect()
}
