//! Pull-based JavaScript lexer
//!
//! [`Lexer`] drives the raw logos tokenizer across a full source text and
//! layers on the two pieces of state a single DFA pass cannot carry:
//!
//! 1. The last *significant* (non-comment) token, which decides whether a
//!    `/` starts a regex literal or is a division operator. When the regex
//!    reading wins, the slash token is extended over the regex body and
//!    flags before being emitted as a single [`TokenKind::Regex`] token.
//! 2. A latched bracket-balance tracker over `()`, `[]` and `{}`. Any
//!    mismatched or unexpected closer marks the scan permanently unbalanced;
//!    the flag never resets.
//!
//! A lexer serves exactly one forward scan over one source text. Concurrent
//! scans each construct their own instance; no state is shared.

use crate::error::ScanError;
use crate::token::{self, RawToken, TokenKind};

/// A token and its half-open byte span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    /// The matched source text, `&source[start..end]`.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Everything a whole-file scan produces: the token stream (comments
/// included, end-of-input excluded) and the final balance verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerOutput<'a> {
    pub tokens: Vec<Token<'a>>,
    pub balanced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delim {
    Paren,
    Bracket,
    Brace,
}

/// Stateful pull lexer over one source text.
pub struct Lexer<'a> {
    raw: logos::Lexer<'a, RawToken>,
    last_significant: Option<TokenKind>,
    open: Vec<Delim>,
    mismatched: bool,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        use logos::Logos;
        Lexer {
            raw: RawToken::lexer(source),
            last_significant: None,
            open: Vec::new(),
            mismatched: false,
            finished: false,
        }
    }

    /// The source text this lexer was constructed over.
    pub fn source(&self) -> &'a str {
        self.raw.source()
    }

    /// Whether every closer seen so far matched the most recently unmatched
    /// opener, in stack order, and nothing is currently open. A mismatch
    /// latches this false for the rest of the scan.
    pub fn is_balanced(&self) -> bool {
        !self.mismatched && self.open.is_empty()
    }

    /// Produce the next token, skipping whitespace.
    ///
    /// Returns an `Eof` token exactly when the end of input is reached;
    /// pulling again keeps returning `Eof`. The first invalid token ends the
    /// scan; after an `Err` the lexer only returns `Eof`.
    pub fn next_token(&mut self) -> Result<Token<'a>, ScanError> {
        if self.finished {
            return Ok(self.eof_token());
        }
        let raw = match self.raw.next() {
            None => {
                self.finished = true;
                return Ok(self.eof_token());
            }
            Some(Err(kind)) => {
                self.finished = true;
                let span = self.raw.span();
                return Err(ScanError::new(kind, span.start, span.end, self.raw.source()));
            }
            Some(Ok(raw)) => raw,
        };

        let kind = if matches!(raw, RawToken::Slash | RawToken::SlashAssign)
            && TokenKind::regex_can_follow(self.last_significant)
        {
            match token::regex_tail_len(self.raw.remainder()) {
                Ok(len) => {
                    self.raw.bump(len);
                    TokenKind::Regex
                }
                Err(kind) => {
                    self.finished = true;
                    let start = self.raw.span().start;
                    let source = self.raw.source();
                    return Err(ScanError::new(kind, start, source.len(), source));
                }
            }
        } else {
            raw.kind(self.raw.slice())
        };

        let span = self.raw.span();
        self.keep_books(kind);
        Ok(Token {
            kind,
            start: span.start,
            end: span.end,
            text: self.raw.slice(),
        })
    }

    fn eof_token(&mut self) -> Token<'a> {
        let len = self.raw.source().len();
        Token {
            kind: TokenKind::Eof,
            start: len,
            end: len,
            text: "",
        }
    }

    fn keep_books(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::OpenParen => self.open.push(Delim::Paren),
            TokenKind::OpenBracket => self.open.push(Delim::Bracket),
            TokenKind::OpenBrace => self.open.push(Delim::Brace),
            TokenKind::CloseParen => self.close(Delim::Paren),
            TokenKind::CloseBracket => self.close(Delim::Bracket),
            TokenKind::CloseBrace => self.close(Delim::Brace),
            TokenKind::LineComment | TokenKind::BlockComment => return,
            _ => {}
        }
        self.last_significant = Some(kind);
    }

    fn close(&mut self, expected: Delim) {
        if self.open.pop() != Some(expected) {
            self.mismatched = true;
        }
    }
}

/// Lex an entire source text, collecting every token up to end of input.
///
/// This is the whole-file validation entry point: callers that want to
/// confirm a script tokenizes cleanly and ends balanced use this rather
/// than a targeted [`match_to_closing_brace`](crate::extract::match_to_closing_brace).
pub fn lex_all(source: &str) -> Result<LexerOutput<'_>, ScanError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.kind == TokenKind::Eof {
            return Ok(LexerOutput {
                tokens,
                balanced: lexer.is_balanced(),
            });
        }
        tokens.push(token);
    }
}
