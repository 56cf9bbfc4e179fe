//! # jsextract
//!
//! A JavaScript-aware tokenizer and brace-matching engine for locating a
//! named function's source body inside large, minified, adversarial
//! JavaScript payloads, without evaluating the script.
//!
//! The crate does not parse JavaScript into an AST and never will; it
//! tokenizes and matches structural delimiters. That is enough to isolate a
//! function body exactly, because the two things that break naive substring
//! or brace-counting approaches are both lexical:
//!
//! - `/` is grammatically ambiguous (division operator vs. regex-literal
//!   delimiter) and is resolved from the last significant token,
//! - brace-like characters inside string/template/regex literals and
//!   comments must be invisible to any depth counter.
//!
//! ## Usage
//!
//! The main entry point is [`match_to_closing_brace`]:
//!
//! ```text
//! let body = jsextract::match_to_closing_brace(script, "Wka=function")?;
//! ```
//!
//! Callers that want to validate a whole script instead use [`lex_all`] or
//! drive a [`Lexer`] directly and check [`Lexer::is_balanced`] at the end.
//!
//! Scans are single-threaded and strictly forward over borrowed source text;
//! independent scans over independently owned text may run on any number of
//! threads.

pub mod error;
pub mod extract;
pub mod lexer;
pub mod token;

pub use error::{ExtractError, InvalidKind, ScanError};
pub use extract::match_to_closing_brace;
pub use lexer::{lex_all, Lexer, LexerOutput, Token};
pub use token::{is_keyword, TokenKind};
