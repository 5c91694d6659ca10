//! Keyword phrase matching over title tokens.
//!
//! A phrase is matched on token boundaries: `"it"` matches `"IT Manager"` but
//! not `"Digital"`. Two wildcards are understood:
//!
//! - a trailing `*` on a word is a prefix match: `engineer*` matches
//!   `engineer`, `engineers`, `engineering`;
//! - a standalone `*` matches one to [`MAX_GAP_TOKENS`] arbitrary words:
//!   `chief * officer` matches `chief executive officer` and
//!   `chief people and culture officer`.

use thiserror::Error;

use crate::classifier::normalize::{fold, tokenize};

/// Upper bound on the words a standalone `*` may skip.
pub const MAX_GAP_TOKENS: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern '{0}' contains no matchable words")]
    Empty(String),

    #[error("pattern '{0}' cannot start or end with a '*' gap")]
    DanglingGap(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternToken {
    Exact(String),
    Prefix(String),
    Gap,
}

impl PatternToken {
    fn accepts(&self, token: &str) -> bool {
        match self {
            PatternToken::Exact(word) => token == word,
            PatternToken::Prefix(stem) => token.starts_with(stem.as_str()),
            PatternToken::Gap => true,
        }
    }
}

/// A compiled keyword or phrase.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    tokens: Vec<PatternToken>,
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let mut tokens = Vec::new();

        for piece in fold(source).split_whitespace() {
            if piece == "*" {
                tokens.push(PatternToken::Gap);
                continue;
            }

            let is_prefix = piece.ends_with('*');
            let words = tokenize(piece.trim_end_matches('*'));
            let last = words.len().saturating_sub(1);
            for (i, word) in words.into_iter().enumerate() {
                if is_prefix && i == last {
                    tokens.push(PatternToken::Prefix(word));
                } else {
                    tokens.push(PatternToken::Exact(word));
                }
            }
        }

        if tokens.iter().all(|t| *t == PatternToken::Gap) {
            return Err(PatternError::Empty(source.to_string()));
        }
        if tokens.first() == Some(&PatternToken::Gap) || tokens.last() == Some(&PatternToken::Gap) {
            return Err(PatternError::DanglingGap(source.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    /// The phrase as written in the catalogue.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when the phrase occurs anywhere in `tokens` on word boundaries.
    pub fn matches(&self, tokens: &[String]) -> bool {
        (0..tokens.len()).any(|start| match_from(&self.tokens, &tokens[start..]))
    }

    /// Ordering key: more literal words first, then longer source text.
    fn specificity(&self) -> (usize, usize) {
        let words = self
            .tokens
            .iter()
            .filter(|t| **t != PatternToken::Gap)
            .count();
        (words, self.source.len())
    }
}

fn match_from(pattern: &[PatternToken], tokens: &[String]) -> bool {
    match pattern.split_first() {
        None => true,
        Some((PatternToken::Gap, rest)) => (1..=MAX_GAP_TOKENS.min(tokens.len()))
            .any(|skip| match_from(rest, &tokens[skip..])),
        Some((head, rest)) => match tokens.split_first() {
            Some((token, remaining)) => head.accepts(token) && match_from(rest, remaining),
            None => false,
        },
    }
}

/// An ordered set of patterns, tried most specific first.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    patterns: Vec<Pattern>,
}

impl KeywordSet {
    pub fn compile<S: AsRef<str>>(sources: &[S]) -> Result<Self, PatternError> {
        let mut patterns = sources
            .iter()
            .map(|s| Pattern::compile(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        // Stable: equal specificity keeps catalogue order.
        patterns.sort_by(|a, b| b.specificity().cmp(&a.specificity()));

        Ok(Self { patterns })
    }

    /// Returns the most specific pattern that matches, if any.
    pub fn first_match(&self, tokens: &[String]) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.matches(tokens))
    }
}
