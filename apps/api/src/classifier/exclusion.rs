//! Exclusion checker: disqualifies titles before any positive matching.
//!
//! Literal terms match as substrings of the normalized title by default, so
//! `"art"` also catches `"Partner"` and `"intern"` catches `"International"`.
//! `ExclusionMode::Word` switches literals to whole-word phrase matching.
//! Caller terms written as `/.../` are case-insensitive regexes.

use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::matching::Pattern;
use crate::classifier::normalize::{fold, NormalizedTitle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionMode {
    #[default]
    Substring,
    Word,
}

impl FromStr for ExclusionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(ExclusionMode::Substring),
            "word" | "whole_word" => Ok(ExclusionMode::Word),
            other => Err(format!(
                "unknown exclusion mode '{other}' (expected 'substring' or 'word')"
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExclusionError {
    #[error("exclusion term is empty")]
    Empty,

    #[error("invalid exclusion regex '{term}': {source}")]
    InvalidRegex {
        term: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
enum TermMatcher {
    Literal {
        needle: String,
        /// `None` when the term has no word characters; such terms only
        /// match in substring mode.
        phrase: Option<Pattern>,
    },
    Regex(Regex),
}

/// One exclusion term, built-in or caller-supplied.
#[derive(Debug, Clone)]
pub struct ExclusionTerm {
    label: String,
    matcher: TermMatcher,
}

impl ExclusionTerm {
    /// Parses `raw`; `/pattern/` becomes a regex, anything else a literal.
    pub fn parse(raw: &str) -> Result<Self, ExclusionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExclusionError::Empty);
        }

        if trimmed.len() > 2 && trimmed.starts_with('/') && trimmed.ends_with('/') {
            let body = &trimmed[1..trimmed.len() - 1];
            let regex = RegexBuilder::new(body)
                .case_insensitive(true)
                .build()
                .map_err(|source| ExclusionError::InvalidRegex {
                    term: trimmed.to_string(),
                    source,
                })?;
            return Ok(Self {
                label: trimmed.to_string(),
                matcher: TermMatcher::Regex(regex),
            });
        }

        Ok(Self {
            label: trimmed.to_lowercase(),
            matcher: TermMatcher::Literal {
                needle: fold(trimmed),
                phrase: Pattern::compile(trimmed).ok(),
            },
        })
    }

    /// The term as reported in `why.excluded_by`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, title: &NormalizedTitle, mode: ExclusionMode) -> bool {
        match &self.matcher {
            TermMatcher::Regex(regex) => regex.is_match(&title.text),
            TermMatcher::Literal { needle, phrase } => match mode {
                ExclusionMode::Substring => title.text.contains(needle.as_str()),
                ExclusionMode::Word => phrase.as_ref().is_some_and(|p| p.matches(&title.tokens)),
            },
        }
    }
}

/// Parses the caller's comma-separated `excludes` field. Blank entries are skipped.
pub fn parse_custom_excludes(csv: &str) -> Result<Vec<ExclusionTerm>, ExclusionError> {
    csv.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ExclusionTerm::parse)
        .collect()
}

/// Built-in terms followed by caller terms. Caller terms only ever add.
#[derive(Debug, Clone, Copy)]
pub struct ExclusionSet<'a> {
    builtin: &'a [ExclusionTerm],
    custom: &'a [ExclusionTerm],
}

impl<'a> ExclusionSet<'a> {
    pub fn new(builtin: &'a [ExclusionTerm], custom: &'a [ExclusionTerm]) -> Self {
        Self { builtin, custom }
    }

    /// First term (built-in list order, then caller order) that catches the title.
    pub fn check(&self, title: &NormalizedTitle, mode: ExclusionMode) -> Option<&'a ExclusionTerm> {
        self.builtin
            .iter()
            .chain(self.custom.iter())
            .find(|term| term.matches(title, mode))
    }
}
