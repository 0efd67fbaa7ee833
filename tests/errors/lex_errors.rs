//! Lexical error tests

use crate::common::*;

#[test]
fn unknown_character() {
    assert_lex_error("let x : int = 3 $ 4;");
    assert_error_contains("let x : int = 3 $ 4;", "unexpected character \"$\"");
}

#[test]
fn unterminated_string() {
    assert_lex_error("__print \"never closed;");
}

#[test]
fn short_colour_literal() {
    // `#fff` is not a colour and `#` starts nothing else
    assert_lex_error("let c : colour = #fff;");
}

#[test]
fn error_points_at_line_and_column() {
    let source = "__print 1;\n__print 2 @ 3;";
    let CompileResult::LexError(message) = compile(source) else {
        panic!("expected a lexical error");
    };
    assert!(message.starts_with("error: lexical error"), "{}", message);
    assert!(message.contains("2:11"), "{}", message);
}

#[test]
fn unterminated_block_comment() {
    assert_lex_error("__print 1;\n/* trailing note");
    assert_error_contains("__print 1; /* a ** b", "unterminated block comment");
}
