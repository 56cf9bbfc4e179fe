//! Isolating a function body from raw JavaScript source
//!
//! Given a literal declaration prefix (e.g. `Wka=function`, already derived
//! by the caller from pattern matching on the page), [`match_to_closing_brace`]
//! returns everything from just past the prefix through the `}` that closes
//! the first `{` opened after it.
//!
//! A naive character scan cannot do this: minified and obfuscated payloads
//! put brace-like characters inside string, template and regex literals and
//! inside comments. Running the real lexer makes those invisible: each
//! literal is consumed as one token, so its contents never reach the depth
//! counter. The scan is a flat loop over tokens; nesting depth is a counter,
//! not recursion, so pathological inputs with hundreds of levels cannot
//! overflow the stack.

use crate::error::ExtractError;
use crate::lexer::Lexer;
use crate::token::TokenKind;

/// Search `source` for `prefix` and return the function body that follows.
///
/// The result is the literal substring starting immediately after the prefix
/// (so it includes anything between the prefix and the opening brace, such
/// as a parameter list) and ending just past the matching closing brace.
///
/// Fails with [`ExtractError::PrefixNotFound`] when the prefix is absent,
/// [`ExtractError::UnterminatedStructure`] when end of input arrives before
/// the brace closes (or before any brace opens), and
/// [`ExtractError::Invalid`] when the source fails to tokenize first.
pub fn match_to_closing_brace<'a>(source: &'a str, prefix: &str) -> Result<&'a str, ExtractError> {
    let found = source.find(prefix).ok_or_else(|| ExtractError::PrefixNotFound {
        prefix: prefix.to_string(),
    })?;
    let body_start = found + prefix.len();
    let tail = &source[body_start..];

    let mut lexer = Lexer::new(tail);
    let mut depth = 0usize;
    let mut opened_at = None;

    loop {
        // scan errors carry tail-relative offsets; report them in the same
        // full-source frame as `opened_at`
        let token = match lexer.next_token() {
            Ok(token) => token,
            Err(err) => return Err(ExtractError::Invalid(err.rebase(body_start, source))),
        };
        match token.kind {
            TokenKind::OpenBrace => {
                if opened_at.is_none() {
                    opened_at = Some(token.start);
                }
                depth += 1;
            }
            // A stray closer before the first opener passes through
            // unexamined; only the span opened after the prefix counts.
            TokenKind::CloseBrace if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&tail[..token.end]);
                }
            }
            TokenKind::Eof => {
                return Err(ExtractError::UnterminatedStructure {
                    opened_at: opened_at.map(|pos| body_start + pos),
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_function_body() {
        let source = "var f=function(a,b){return a+b;};f(1,2);";
        assert_eq!(
            match_to_closing_brace(source, "f=function").unwrap(),
            "(a,b){return a+b;}"
        );
    }

    #[test]
    fn test_nested_braces() {
        let source = "g=function(x){if(x){return{a:{b:1}};}return{};};";
        assert_eq!(
            match_to_closing_brace(source, "g=function").unwrap(),
            "(x){if(x){return{a:{b:1}};}return{};}"
        );
    }

    #[test]
    fn test_brace_inside_string_does_not_close() {
        // a naive counter would stop at the `}` inside the string
        let source = "h=function(){var s=\"}\";return s;};";
        assert_eq!(
            match_to_closing_brace(source, "h=function").unwrap(),
            "(){var s=\"}\";return s;}"
        );
    }

    #[test]
    fn test_brace_inside_comment_does_not_close() {
        let source = "h=function(){/* } */ return 1;};";
        assert_eq!(
            match_to_closing_brace(source, "h=function").unwrap(),
            "(){/* } */ return 1;}"
        );
    }

    #[test]
    fn test_prefix_not_found() {
        let err = match_to_closing_brace("var a = 1;", "missing=function").unwrap_err();
        assert!(matches!(err, ExtractError::PrefixNotFound { .. }));
    }

    #[test]
    fn test_unterminated_structure() {
        let source = "k=function(){var a = 1;";
        let err = match_to_closing_brace(source, "k=function").unwrap_err();
        assert_eq!(
            err,
            ExtractError::UnterminatedStructure {
                opened_at: Some(source.find('{').unwrap()),
            }
        );
    }

    #[test]
    fn test_no_brace_after_prefix() {
        let err = match_to_closing_brace("k=function(a,b)", "k=function").unwrap_err();
        assert_eq!(err, ExtractError::UnterminatedStructure { opened_at: None });
    }

    #[test]
    fn test_invalid_source_propagates() {
        let source = "k=function(){var s = \"unterminated};";
        let err = match_to_closing_brace(source, "k=function").unwrap_err();
        assert!(matches!(err, ExtractError::Invalid(_)));
    }

    #[test]
    fn test_invalid_token_reported_in_source_coordinates() {
        // the scan runs over the post-prefix tail, but reported positions
        // must index the source the caller passed in, like `opened_at` does
        let source = "var pad = 1; k=function(){var s = \"oops";
        match match_to_closing_brace(source, "k=function") {
            Err(ExtractError::Invalid(scan)) => {
                assert_eq!(scan.start, source.find('"').unwrap());
                assert_eq!(scan.end, source.len());
                assert!(scan.context.contains("var pad"));
            }
            other => panic!("expected invalid-token error, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_closer_before_opener_is_ignored() {
        // the prefix lands mid-expression; the `)` and `}` before the body's
        // own `{` must not terminate or underflow anything
        let source = "x)}; k=function(){return 1;};";
        let body = match_to_closing_brace(source, "x").unwrap();
        assert_eq!(body, ")}; k=function(){return 1;}");
    }

    #[test]
    fn test_first_occurrence_of_prefix_wins() {
        let source = "a=function(){return 1;};a=function(){return 2;};";
        assert_eq!(
            match_to_closing_brace(source, "a=function").unwrap(),
            "(){return 1;}"
        );
    }
}
