//! Lazy identifier / other-character tokenizer.

use std::iter::FusedIterator;

/// Whitespace skipped by free-form dialects: newlines are insignificant.
pub const C_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0c'];

/// Whitespace skipped by line-oriented dialects: a call name and its `(`
/// must sit on the same line, so line breaks stay visible as tokens.
pub const LINE_WHITESPACE: &[char] = &[' ', '\t'];

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Maximal run of `[A-Za-z_][A-Za-z0-9_]*`.
    Identifier,
    /// Any single character that is neither ignored nor part of an identifier.
    Other,
}

/// A token borrowed from the tokenized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// True for an `Other` token carrying exactly `c`.
    pub fn is_char(&self, c: char) -> bool {
        self.kind == TokenKind::Other && self.text.chars().eq(std::iter::once(c))
    }
}

/// Splits text into [`Token`]s, dropping ignored characters.
///
/// The sequence is lazy and finite; exhaustion (`None`) is the end-of-input
/// marker, and the iterator keeps returning `None` afterwards.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    rest: &'a str,
    ignored: &'a [char],
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str, ignored: &'a [char]) -> Self {
        Self {
            rest: text,
            ignored,
        }
    }
}

fn begins_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn inside_identifier(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.rest = self.rest.trim_start_matches(self.ignored);

        let first = self.rest.chars().next()?;

        if begins_identifier(first) {
            let end = self
                .rest
                .find(|c: char| !inside_identifier(c))
                .unwrap_or(self.rest.len());
            let (text, rest) = self.rest.split_at(end);
            self.rest = rest;
            return Some(Token {
                kind: TokenKind::Identifier,
                text,
            });
        }

        let (text, rest) = self.rest.split_at(first.len_utf8());
        self.rest = rest;
        Some(Token {
            kind: TokenKind::Other,
            text,
        })
    }
}

impl FusedIterator for Tokenizer<'_> {}
