//! Transition-table coverage for the regex/division ambiguity
//!
//! The decision lives in one place (`TokenKind::regex_can_follow`) and is
//! driven entirely by the last significant token. Each case here puts a
//! slash in a context where exactly one reading is correct and checks which
//! one the lexer took.

use jsextract::{lex_all, TokenKind};

fn has_regex(source: &str) -> bool {
    lex_all(source)
        .expect("case source should lex")
        .tokens
        .iter()
        .any(|t| t.kind == TokenKind::Regex)
}

#[rstest::rstest]
// regex position: start of input, keywords, opening punctuators, operators
#[case::start_of_input("/ab/.test(x)", true)]
#[case::after_return("return /ab/g;", true)]
#[case::after_typeof("typeof /ab/", true)]
#[case::after_open_paren("f(/ab/)", true)]
#[case::after_open_bracket("[/ab/]", true)]
#[case::after_open_brace("{ /ab/ }", true)]
#[case::after_close_brace("{}/ab/", true)]
#[case::after_comma("f(a, /ab/)", true)]
#[case::after_assign("x = /ab/", true)]
#[case::after_logical_and("a && /ab/", true)]
#[case::after_not("!/ab/.test(x)", true)]
#[case::after_colon("x = {k: /ab/}", true)]
#[case::after_semicolon("a; /ab/", true)]
#[case::slash_assign_in_regex_position("f(/=a/)", true)]
// division position: identifiers, literals, closing value contexts
#[case::after_identifier("a/b/c", false)]
#[case::after_number("10/2/1", false)]
#[case::after_string("\"s\"/2", false)]
#[case::after_template("`t`/2", false)]
#[case::after_close_paren("(a)/2", false)]
#[case::after_close_bracket("a[0]/2", false)]
#[case::after_increment("a++/2", false)]
#[case::after_decrement("a--/2", false)]
fn test_slash_disambiguation(#[case] source: &str, #[case] expect_regex: bool) {
    assert_eq!(
        has_regex(source),
        expect_regex,
        "wrong slash reading for {:?}",
        source
    );
}

#[rstest::rstest]
// a comment between the deciding token and the slash changes nothing
#[case::line_comment_then_regex("return //c\n/ab/;", true)]
#[case::block_comment_then_regex("return /*c*/ /ab/;", true)]
#[case::block_comment_then_division("a /*c*/ /2", false)]
fn test_comments_are_insignificant(#[case] source: &str, #[case] expect_regex: bool) {
    assert_eq!(has_regex(source), expect_regex);
}

#[test]
fn test_division_chain_token_shapes() {
    let output = lex_all("a/b/c").unwrap();
    let texts: Vec<_> = output.tokens.iter().map(|t| t.text).collect();
    assert_eq!(texts, vec!["a", "/", "b", "/", "c"]);
}

#[test]
fn test_regex_token_includes_flags() {
    let output = lex_all("return /ab/g;").unwrap();
    assert_eq!(output.tokens[1].kind, TokenKind::Regex);
    assert_eq!(output.tokens[1].text, "/ab/g");
}
