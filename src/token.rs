//! Token definitions and classification for JavaScript source
//!
//! The raw tokenization is done through the logos lexer library. Rules that a
//! single DFA pass cannot express (string bodies with escapes, template
//! literals with `${...}` interpolation, block comments) are handled by
//! callbacks that scan the remainder by hand and extend the token with
//! `bump`. The one rule that needs *context* (whether a `/` starts a regex
//! literal or is a division operator) cannot be decided here at all; the
//! [`Lexer`](crate::lexer::Lexer) resolves it from the last significant token
//! and re-scans the slash token as a regex via [`regex_tail_len`].
//!
//! Keywords are not separate DFA rules: identifiers are classified against a
//! fixed keyword table after matching, since the distinction only feeds the
//! regex/division decision and is otherwise informational.

use logos::Logos;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::error::InvalidKind;

/// Raw tokens as produced by the logos DFA, before keyword classification
/// and regex reinterpretation.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = InvalidKind)]
#[logos(skip r"[ \t\r\n\u{000B}\u{000C}\u{00A0}\u{FEFF}]+")]
pub(crate) enum RawToken {
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Identifier,

    // Decimal with optional fraction/exponent, leading-dot decimals, and the
    // hex/octal/binary radix prefixes. Only the span matters; no value is
    // ever computed.
    #[regex(r"[0-9]+\.?[0-9]*(?:[eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+(?:[eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    #[regex(r"0[oO][0-7]+")]
    #[regex(r"0[bB][01]+")]
    Number,

    #[token("\"", scan_double_quoted)]
    #[token("'", scan_single_quoted)]
    Str,

    #[token("`", scan_template)]
    Template,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", scan_block_comment)]
    BlockComment,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    #[token("++")]
    Increment,
    #[token("--")]
    Decrement,

    // Kept apart from the punctuator table so the lexer can reinterpret them
    // as the start of a regex literal. In regex position `/=` contributes a
    // leading `=` to the regex body.
    #[token("/")]
    Slash,
    #[token("/=")]
    SlashAssign,

    // Remaining operators and punctuation. Logos picks the longest match, so
    // `===` wins over `==` wins over `=`.
    #[token(">>>=")]
    #[token("...")]
    #[token("===")]
    #[token("!==")]
    #[token(">>>")]
    #[token("**=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&&=")]
    #[token("||=")]
    #[token("??=")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("??")]
    #[token("?.")]
    #[token("=>")]
    #[token("**")]
    #[token("<<")]
    #[token(">>")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<")]
    #[token(">")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("%")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("!")]
    #[token("~")]
    #[token("?")]
    #[token(":")]
    #[token(";")]
    #[token(",")]
    #[token(".")]
    #[token("=")]
    Punct,
}

/// The public token classification.
///
/// Structural punctuators keep dedicated variants because brace matching and
/// the regex/division decision consult them; every other operator collapses
/// into [`TokenKind::Punct`]. Invalid input is not a token kind: it is the
/// `Err` arm of [`Lexer::next_token`](crate::lexer::Lexer::next_token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    Str,
    Template,
    Regex,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Increment,
    Decrement,
    Punct,
    LineComment,
    BlockComment,
    Eof,
}

impl TokenKind {
    /// Comments are skipped for disambiguation and balance purposes.
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// A significant token is anything except a comment; only significant
    /// tokens feed the regex/division decision.
    pub fn is_significant(self) -> bool {
        !self.is_comment()
    }

    /// Decide whether a `/` encountered *after* `last` starts a regex
    /// literal (true) or is a division operator (false).
    ///
    /// The rule, taken from the sweet.js design notes
    /// (<https://github.com/sweet-js/sweet-core/wiki/design>): a regex can
    /// follow the start of input, a keyword, or any punctuator except the
    /// value-ending ones `)`, `]`, `++`, `--`. After an identifier or any
    /// literal the slash is division.
    pub fn regex_can_follow(last: Option<TokenKind>) -> bool {
        let Some(kind) = last else {
            return true;
        };
        match kind {
            TokenKind::Keyword
            | TokenKind::OpenParen
            | TokenKind::OpenBracket
            | TokenKind::OpenBrace
            | TokenKind::CloseBrace
            | TokenKind::Punct => true,
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::Str
            | TokenKind::Template
            | TokenKind::Regex
            | TokenKind::CloseParen
            | TokenKind::CloseBracket
            | TokenKind::Increment
            | TokenKind::Decrement => false,
            // Comments never become the last significant token and Eof is
            // never followed by anything.
            TokenKind::LineComment | TokenKind::BlockComment | TokenKind::Eof => false,
        }
    }
}

impl RawToken {
    /// Map a raw token to its public kind. `slice` is the matched text,
    /// needed to split keywords from plain identifiers.
    pub(crate) fn kind(self, slice: &str) -> TokenKind {
        match self {
            RawToken::Identifier if is_keyword(slice) => TokenKind::Keyword,
            RawToken::Identifier => TokenKind::Identifier,
            RawToken::Number => TokenKind::Number,
            RawToken::Str => TokenKind::Str,
            RawToken::Template => TokenKind::Template,
            RawToken::LineComment => TokenKind::LineComment,
            RawToken::BlockComment => TokenKind::BlockComment,
            RawToken::OpenParen => TokenKind::OpenParen,
            RawToken::CloseParen => TokenKind::CloseParen,
            RawToken::OpenBracket => TokenKind::OpenBracket,
            RawToken::CloseBracket => TokenKind::CloseBracket,
            RawToken::OpenBrace => TokenKind::OpenBrace,
            RawToken::CloseBrace => TokenKind::CloseBrace,
            RawToken::Increment => TokenKind::Increment,
            RawToken::Decrement => TokenKind::Decrement,
            RawToken::Slash | RawToken::SlashAssign | RawToken::Punct => TokenKind::Punct,
        }
    }
}

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
        "default", "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for",
        "function", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return",
        "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void",
        "while", "with", "yield",
    ]
    .into_iter()
    .collect()
});

/// Check whether an identifier is a reserved word.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn scan_double_quoted(lex: &mut logos::Lexer<RawToken>) -> Result<(), InvalidKind> {
    scan_quoted(lex, '"')
}

fn scan_single_quoted(lex: &mut logos::Lexer<RawToken>) -> Result<(), InvalidKind> {
    scan_quoted(lex, '\'')
}

/// Consume a string body up to the matching unescaped quote. A backslash
/// escapes the following character, whatever it is.
fn scan_quoted(lex: &mut logos::Lexer<RawToken>, quote: char) -> Result<(), InvalidKind> {
    let remainder = lex.remainder();
    let mut escaped = false;
    for (idx, c) in remainder.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == quote {
            lex.bump(idx + c.len_utf8());
            return Ok(());
        }
    }
    lex.bump(remainder.len());
    Err(InvalidKind::UnterminatedString)
}

/// Consume a template literal body up to the matching unescaped backtick.
///
/// `${...}` interpolation regions are tracked by curly depth: while a region
/// is open, braces nest freely and a backtick belongs to the template body,
/// so neither an interpolated `}` nor a nested backtick ends the literal
/// early.
fn scan_template(lex: &mut logos::Lexer<RawToken>) -> Result<(), InvalidKind> {
    let remainder = lex.remainder();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut dollar = false;
    for (idx, c) in remainder.char_indices() {
        if escaped {
            escaped = false;
            dollar = false;
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                dollar = false;
            }
            '{' if dollar || depth > 0 => {
                depth += 1;
                dollar = false;
            }
            '}' if depth > 0 => {
                depth -= 1;
                dollar = false;
            }
            '`' if depth == 0 => {
                lex.bump(idx + 1);
                return Ok(());
            }
            '$' => dollar = true,
            _ => dollar = false,
        }
    }
    lex.bump(remainder.len());
    Err(InvalidKind::UnterminatedTemplate)
}

fn scan_block_comment(lex: &mut logos::Lexer<RawToken>) -> Result<(), InvalidKind> {
    match lex.remainder().find("*/") {
        Some(idx) => {
            lex.bump(idx + 2);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(InvalidKind::UnterminatedComment)
        }
    }
}

/// Scan the tail of a regex literal whose opening `/` has already been
/// consumed, returning how many bytes of `remainder` belong to it (body
/// through closing `/`, plus any flags).
///
/// Inside an open `[...]` character class an unescaped `/` does not end the
/// literal. A newline or end of input before the closing `/` is an error.
pub(crate) fn regex_tail_len(remainder: &str) -> Result<usize, InvalidKind> {
    let mut escaped = false;
    let mut in_class = false;
    let mut body_end = None;
    for (idx, c) in remainder.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\n' => return Err(InvalidKind::UnterminatedRegex),
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                body_end = Some(idx + 1);
                break;
            }
            _ => {}
        }
    }
    let body_end = body_end.ok_or(InvalidKind::UnterminatedRegex)?;

    let mut end = body_end;
    for (idx, c) in remainder[body_end..].char_indices() {
        if !is_ident_continue(c) {
            break;
        }
        end = body_end + idx + c.len_utf8();
    }
    Ok(end)
}
