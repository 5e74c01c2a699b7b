//! Dialect definitions: keyword sets, whitespace classes and call guards.

use crate::tokenize::{C_WHITESPACE, LINE_WHITESPACE, Token};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Language family used to classify call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// C and its relatives: free-form whitespace, `type name(` is a declaration.
    C,
    /// Python: line-oriented, `def name(` is a declaration.
    Python,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::C, Dialect::Python];

    /// Keywords that are never call names for this dialect.
    pub fn default_keywords(self) -> &'static [&'static str] {
        match self {
            Dialect::C => &[
                "if", "for", "while", "else", "switch", "return", "sizeof", "case", "do",
            ],
            Dialect::Python => &[
                "if", "in", "or", "and", "for", "while", "else", "elif", "def", "not", "is",
                "return", "with", "assert", "lambda", "yield",
            ],
        }
    }

    /// Characters the tokenizer drops for this dialect.
    pub fn ignored_chars(self) -> &'static [char] {
        match self {
            Dialect::C => C_WHITESPACE,
            Dialect::Python => LINE_WHITESPACE,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::C => write!(f, "c"),
            Dialect::Python => write!(f, "python"),
        }
    }
}

/// Resolved rules for one dialect: its keyword set and tokenizer whitespace.
#[derive(Debug, Clone)]
pub struct DialectRules {
    dialect: Dialect,
    keywords: HashSet<String>,
}

impl DialectRules {
    /// Rules with the dialect's default keywords.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_extra_keywords(dialect, std::iter::empty::<&str>())
    }

    /// Rules with the default keywords plus `extra`.
    pub fn with_extra_keywords<I, S>(dialect: Dialect, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: HashSet<String> = dialect
            .default_keywords()
            .iter()
            .map(|k| k.to_string())
            .collect();
        keywords.extend(extra.into_iter().map(|k| k.as_ref().to_string()));

        Self { dialect, keywords }
    }

    pub fn ignored_chars(&self) -> &'static [char] {
        self.dialect.ignored_chars()
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// An identifier token that is not a keyword.
    pub(super) fn is_plain_identifier(&self, token: Option<&Token<'_>>) -> bool {
        token.is_some_and(|t| t.is_identifier() && !self.is_keyword(t.text))
    }

    /// Guard on the token two positions before `(`.
    ///
    /// - C: rejects `identifier identifier (`, the shape of a declaration or
    ///   cast such as `int foo(`.
    /// - Python: rejects `def name(`.
    pub(super) fn guard_admits(&self, prev2: Option<&Token<'_>>) -> bool {
        match self.dialect {
            Dialect::C => !self.is_plain_identifier(prev2),
            Dialect::Python => !prev2.is_some_and(|t| t.is_identifier() && t.text == "def"),
        }
    }
}
