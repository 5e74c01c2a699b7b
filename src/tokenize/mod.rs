//! Lexical splitting of code buffers into identifiers and single characters.
//!
//! The tokenizer knows nothing about languages: keyword filtering and call
//! detection happen one layer up, in `calls`.

mod tokenizer;


pub use tokenizer::{C_WHITESPACE, LINE_WHITESPACE, Token, TokenKind, Tokenizer};
