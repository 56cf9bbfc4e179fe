//! Error types for tokenization and extraction
//!
//! All failures are surfaced as values. Lexing stops at the first invalid
//! token; there is no recovery or resynchronization. Each error carries the
//! offending span plus a bounded window of surrounding source so callers can
//! log something a human can act on without reproducing the scan.

use std::fmt;

/// How much surrounding source is captured into an error's context window.
const CONTEXT_BYTES: usize = 50;

/// The lexical rule that failed when a token could not be produced.
///
/// This doubles as the error type of the raw logos lexer; the `Default`
/// variant is what logos reports for input no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum InvalidKind {
    /// No lexical rule matched at this position
    #[default]
    UnexpectedCharacter,
    /// A `'` or `"` string never reached its closing quote
    UnterminatedString,
    /// A template literal never reached its closing backtick
    UnterminatedTemplate,
    /// A `/* ... */` comment never reached `*/`
    UnterminatedComment,
    /// A regex literal never reached its closing `/` on the same line
    UnterminatedRegex,
}

impl InvalidKind {
    fn describe(self) -> &'static str {
        match self {
            InvalidKind::UnexpectedCharacter => "unexpected character",
            InvalidKind::UnterminatedString => "unterminated string literal",
            InvalidKind::UnterminatedTemplate => "unterminated template literal",
            InvalidKind::UnterminatedComment => "unterminated block comment",
            InvalidKind::UnterminatedRegex => "unterminated regex literal",
        }
    }
}

impl fmt::Display for InvalidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A lexical failure at a specific source position.
///
/// `start..end` is the span the lexer had consumed when the rule failed
/// (for unterminated literals this runs to the end of input). `context` is
/// a short excerpt of the source around `start`, already extracted so the
/// error stays useful after the source text is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub kind: InvalidKind,
    pub start: usize,
    pub end: usize,
    pub context: String,
}

impl ScanError {
    pub(crate) fn new(kind: InvalidKind, start: usize, end: usize, source: &str) -> Self {
        ScanError {
            kind,
            start,
            end,
            context: context_window(source, start, end),
        }
    }

    /// Shift an error produced while lexing a slice of `source` back into
    /// full-source coordinates, rebuilding the context window so it can reach
    /// text preceding the slice.
    pub(crate) fn rebase(self, offset: usize, source: &str) -> Self {
        ScanError::new(self.kind, self.start + offset, self.end + offset, source)
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at position {}, near {:?}",
            self.kind, self.start, self.context
        )
    }
}

impl std::error::Error for ScanError {}

/// Failure modes of [`match_to_closing_brace`](crate::extract::match_to_closing_brace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The declaration prefix does not occur in the source at all. The caller
    /// must re-derive the prefix; retrying on the same input cannot succeed.
    PrefixNotFound { prefix: String },
    /// An opening `{` after the prefix never closed before end of input
    /// (or no `{` followed the prefix). `opened_at` is the offset of the
    /// first `{` in the full source, when one was seen.
    UnterminatedStructure { opened_at: Option<usize> },
    /// The source failed to tokenize while scanning for the closing brace.
    /// The wrapped error's positions are offsets into the full source, like
    /// `opened_at` above, even though the scan itself starts past the prefix.
    Invalid(ScanError),
}

impl From<ScanError> for ExtractError {
    fn from(err: ScanError) -> Self {
        ExtractError::Invalid(err)
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::PrefixNotFound { prefix } => {
                write!(f, "declaration prefix {:?} not found in source", prefix)
            }
            ExtractError::UnterminatedStructure { opened_at: Some(pos) } => {
                write!(f, "brace opened at position {} never closes", pos)
            }
            ExtractError::UnterminatedStructure { opened_at: None } => {
                write!(f, "no opening brace follows the declaration prefix")
            }
            ExtractError::Invalid(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

/// Extract a bounded excerpt around a failure position.
///
/// Takes up to [`CONTEXT_BYTES`] before `start` and up to the same amount of
/// the failed span itself, clamped to char boundaries. Long unterminated
/// literals therefore do not drag the whole rest of the file into the error.
fn context_window(source: &str, start: usize, end: usize) -> String {
    let mut begin = start.saturating_sub(CONTEXT_BYTES);
    while begin > 0 && !source.is_char_boundary(begin) {
        begin -= 1;
    }
    let mut stop = end.min(start + CONTEXT_BYTES).min(source.len());
    while stop > begin && !source.is_char_boundary(stop) {
        stop -= 1;
    }
    source[begin..stop].to_string()
}
