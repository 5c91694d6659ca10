//! Title normalization: case folding, diacritic folding, tokenization.
//!
//! The same routine is applied to titles and to catalogue phrases, so a phrase
//! written as `"R&D"` or `"diseño"` compares equal to the title forms it should
//! catch.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// A job title prepared for matching. The raw title is kept by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTitle {
    /// Lowercased, trimmed, diacritic-folded, single-spaced text.
    pub text: String,
    /// Alphanumeric runs of `text`, in order.
    pub tokens: Vec<String>,
}

impl NormalizedTitle {
    pub fn new(raw: &str) -> Self {
        let text = fold(raw);
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Lowercases, strips diacritics (`"Diseño"` → `"diseno"`), trims and collapses
/// internal whitespace. Punctuation is kept.
pub fn fold(raw: &str) -> String {
    let stripped: String = raw
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits folded text on whitespace and separators (`/`, `-`, `&`, `.`, ...).
pub fn tokenize(folded: &str) -> Vec<String> {
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
