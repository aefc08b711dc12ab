use suru_core::StringStore;

use crate::lexer::Lexer;
use crate::token::TokenKind;

/// Lexes everything and renders one line per token, with text payloads
/// debug-escaped so control characters stay visible in snapshots.
fn lex(source: &str) -> String {
    let mut strings = StringStore::new();
    let mut lexer = Lexer::new(source, &mut strings);
    let mut lines = Vec::new();
    loop {
        let token = lexer.bump();
        if token.kind == TokenKind::Eof {
            break;
        }
        let line = match token.text {
            Some(text) => format!("{:?} {:?}", token.kind, lexer.strings().resolve(text)),
            None => format!("{:?}", token.kind),
        };
        lines.push(line);
    }
    lines.join("\n")
}

// ============================================================================
// Identifiers and keywords
// ============================================================================

#[test]
fn keywords_and_identifiers() {
    insta::assert_snapshot!(lex("match true false and or module import export return type try this partial"), @r#"
    Match
    True
    False
    And
    Or
    Module
    Import
    Export
    Return
    Type
    Try
    This
    Partial
    "#);
}

#[test]
fn uppercase_first_skips_keyword_lookup() {
    insta::assert_snapshot!(lex("Match True greeting"), @r#"
    Identifier "Match"
    Identifier "True"
    Identifier "greeting"
    "#);
}

#[test]
fn long_lexemes_skip_keyword_lookup() {
    // Eight characters and up can never be keywords; seven-character
    // non-keywords still fall through to identifier.
    insta::assert_snapshot!(lex("partials matches"), @r#"
    Identifier "partials"
    Identifier "matches"
    "#);
}

#[test]
fn not_is_an_identifier_at_token_level() {
    insta::assert_snapshot!(lex("not x"), @r#"
    Identifier "not"
    Identifier "x"
    "#);
}

#[test]
fn bare_underscore_is_punctuation() {
    insta::assert_snapshot!(lex("_ _x x_1"), @r#"
    Underscore
    Identifier "_x"
    Identifier "x_1"
    "#);
}

// ============================================================================
// Punctuation, trivia, unknown bytes
// ============================================================================

#[test]
fn punctuation() {
    insta::assert_snapshot!(lex(": ; , . | * ( ) { } [ ] < > + -"), @r#"
    Colon
    Semicolon
    Comma
    Dot
    Pipe
    Star
    LParen
    RParen
    LBrace
    RBrace
    LBracket
    RBracket
    LAngle
    RAngle
    Plus
    Minus
    "#);
}

#[test]
fn newlines_are_tokens_other_whitespace_is_not() {
    insta::assert_snapshot!(lex("a\n\tb\r\nc"), @r#"
    Identifier "a"
    Newline
    Identifier "b"
    Newline
    Identifier "c"
    "#);
}

#[test]
fn comment_runs_to_line_end_without_consuming_it() {
    insta::assert_snapshot!(lex("a // rest of line\nb"), @r#"
    Identifier "a"
    Comment "// rest of line"
    Newline
    Identifier "b"
    "#);
}

#[test]
fn unknown_bytes_become_unknown_tokens() {
    insta::assert_snapshot!(lex("@ #"), @r#"
    Unknown
    Unknown
    "#);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn number_forms() {
    insta::assert_snapshot!(lex("42 1_000 3.14 0b10_10 0o755 0xff_AA"), @r#"
    Number "42"
    Number "1_000"
    NumberFloat "3.14"
    NumberBinary "0b10_10"
    NumberOctal "0o755"
    NumberHex "0xff_AA"
    "#);
}

#[test]
fn type_suffixes_join_the_literal() {
    insta::assert_snapshot!(lex("12i32 7u8 2.5f64 100u128"), @r#"
    Number "12i32"
    Number "7u8"
    NumberFloat "2.5f64"
    Number "100u128"
    "#);
}

#[test]
fn suffix_requires_non_identifier_follower() {
    // `i32x` cannot be a suffix, so the digits end the literal and the rest
    // lexes as an identifier. `i1` is not a width at all.
    insta::assert_snapshot!(lex("12i32x 9i1"), @r#"
    Number "12"
    Identifier "i32x"
    Number "9"
    Identifier "i1"
    "#);
}

// ============================================================================
// Ordinary strings
// ============================================================================

#[test]
fn strings_keep_their_quotes() {
    insta::assert_snapshot!(lex(r#""hello" 'single'"#), @r#"
    String "\"hello\""
    String "'single'"
    "#);
}

#[test]
fn backslash_escapes_one_byte() {
    insta::assert_snapshot!(lex(r#""a\"b" "c\\""#), @r#"
    String "\"a\\\"b\""
    String "\"c\\\\\""
    "#);
}

#[test]
fn unterminated_string_truncates_at_eof() {
    insta::assert_snapshot!(lex("\"runs off"), @r#"String "\"runs off""#);
}

// ============================================================================
// Interpolated strings
// ============================================================================

#[test]
fn interpolation_single_backtick() {
    insta::assert_snapshot!(lex("`hi{name}yo`"), @r#"
    StringIStart "1"
    StringI "hi"
    StringIExprStart
    Identifier "name"
    StringIExprEnd
    StringI "yo"
    StringIEnd "1"
    "#);
}

#[test]
fn interpolation_double_backtick_needs_double_braces() {
    insta::assert_snapshot!(lex("``a{{x}}b``"), @r#"
    StringIStart "2"
    StringI "a"
    StringIExprStart
    Identifier "x"
    StringIExprEnd
    StringI "b"
    StringIEnd "2"
    "#);
}

#[test]
fn single_brace_is_content_when_delimiter_count_is_two() {
    insta::assert_snapshot!(lex("``a{b``"), @r#"
    StringIStart "2"
    StringI "a{b"
    StringIEnd "2"
    "#);
}

#[test]
fn nested_braces_inside_expression() {
    // Only the outermost closing run ends the expression; inner braces are
    // ordinary tokens that track the depth.
    insta::assert_snapshot!(lex("`{ {x} }`"), @r#"
    StringIStart "1"
    StringIExprStart
    LBrace
    Identifier "x"
    RBrace
    StringIExprEnd
    StringIEnd "1"
    "#);
}

#[test]
fn escapes_do_not_close_delimiters() {
    insta::assert_snapshot!(lex(r"`a\`b`"), @r#"
    StringIStart "1"
    StringI "a\\`b"
    StringIEnd "1"
    "#);
}

#[test]
fn multiline_interpolation_without_indent() {
    insta::assert_snapshot!(lex("``\nhi\n``\n"), @r#"
    StringIStart "2"
    StringI "\nhi"
    StringIEnd "2"
    Newline
    "#);
}

#[test]
fn multiline_interpolation_with_indented_close() {
    insta::assert_snapshot!(lex("``\n  hi\n  ``\n"), @r#"
    StringIStart "2"
    StringI "\n  hi"
    StringIIndent "  "
    StringIEnd "2"
    Newline
    "#);
}

#[test]
fn empty_multiline_interpolation() {
    insta::assert_snapshot!(lex("``\n``"), @r#"
    StringIStart "2"
    StringIEnd "2"
    "#);
}

#[test]
fn unterminated_interpolation_truncates_at_eof() {
    insta::assert_snapshot!(lex("`abc"), @r#"
    StringIStart "1"
    StringI "abc"
    "#);
}

#[test]
fn interpolation_inside_statement() {
    insta::assert_snapshot!(lex("x : `v={n}`"), @r#"
    Identifier "x"
    Colon
    StringIStart "1"
    StringI "v="
    StringIExprStart
    Identifier "n"
    StringIExprEnd
    StringIEnd "1"
    "#);
}

// ============================================================================
// Documentation blocks
// ============================================================================

#[test]
fn documentation_block_spans_to_closing_delimiter() {
    insta::assert_snapshot!(lex("====\nsome docs\n====\nx"), @r#"
    Documentation "====\nsome docs\n===="
    Newline
    Identifier "x"
    "#);
}

#[test]
fn documentation_without_close_runs_to_eof() {
    insta::assert_snapshot!(lex("====\nleft open"), @r#"Documentation "====\nleft open""#);
}

#[test]
fn equals_mid_line_is_not_documentation() {
    insta::assert_snapshot!(lex("a ===="), @r#"
    Identifier "a"
    Unknown
    Unknown
    Unknown
    Unknown
    "#);
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn positions_are_one_based() {
    let mut strings = StringStore::new();
    let mut lexer = Lexer::new("a\n  b", &mut strings);
    let a = lexer.bump();
    assert_eq!((a.line, a.column), (1, 1));
    let newline = lexer.bump();
    assert_eq!((newline.line, newline.column), (1, 2));
    let b = lexer.bump();
    assert_eq!((b.line, b.column), (2, 3));
}

#[test]
fn identical_lexemes_share_one_handle() {
    let mut strings = StringStore::new();
    let mut lexer = Lexer::new("foo bar foo", &mut strings);
    let first = lexer.bump();
    let _bar = lexer.bump();
    let second = lexer.bump();
    assert_eq!(first.text, second.text);
}
