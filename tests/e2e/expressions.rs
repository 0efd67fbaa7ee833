//! End-to-end tests for operators and literals

use crate::common::*;

#[test]
fn arithmetic_precedence() {
    assert_eq!(run_output("__print 2 + 3 * 4; __print (2 + 3) * 4;"), ["14", "20"]);
}

#[test]
fn subtraction_and_division_keep_operand_order() {
    assert_eq!(run_output("__print 10 - 4; __print 20 / 5; __print 17 % 5;"), ["6", "4", "2"]);
}

#[test]
fn left_associativity() {
    assert_eq!(run_output("__print 20 - 5 - 3; __print 64 / 4 / 2;"), ["12", "8"]);
}

#[test]
fn negation() {
    assert_eq!(run_output("__print -5 + 2; __print -(1.5);"), ["-3", "-1.5"]);
}

#[test]
fn most_negative_integer_literal() {
    let source = "let m : int = -9223372036854775808; __print m; __print m + 1;";
    assert_eq!(run_output(source), ["-9223372036854775808", "-9223372036854775807"]);
}

#[test]
fn float_arithmetic() {
    assert_eq!(run_output("__print 1.5 * 2.0; __print 7.0 / 2.0;"), ["3", "3.5"]);
}

#[test]
fn comparisons() {
    let output = run_output("__print 1 < 2; __print 2 <= 2; __print 3 > 4; __print 3 >= 4; __print 1 != 1;");
    assert_eq!(output, ["true", "true", "false", "false", "false"]);
}

#[test]
fn logical_operators() {
    let output = run_output("__print true and false; __print true or false; __print not false;");
    assert_eq!(output, ["false", "true", "true"]);
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(run_output("__print true or false and false;"), ["true"]);
}

#[test]
fn colour_and_string_equality() {
    let output = run_output(r#"__print #aabbcc == #aabbcc; __print "a" != "b";"#);
    assert_eq!(output, ["true", "true"]);
}

#[test]
fn zero_initialised_declarations() {
    let source = r#"
        let i : int; let f : float; let b : bool; let c : colour; let s : string;
        __print i; __print f; __print b; __print c; __print s;
    "#;
    assert_eq!(run_output(source), ["0", "0", "false", "#000000", ""]);
}
