//! End-to-end tests for block scoping

use crate::common::*;
use crate::common::fixtures::SHADOWING;

#[test]
fn inner_declaration_shadows_outer() {
    assert_eq!(run_output(SHADOWING), ["2", "3", "1"]);
}

#[test]
fn assignment_reaches_outer_frame() {
    let source = "let x : int = 1; { { x = 7; } } __print x;";
    assert_eq!(run_output(source), ["7"]);
}

#[test]
fn loop_body_declarations_are_fresh_each_iteration() {
    let source = r#"
        for (let i : int = 0; i < 3; i = i + 1) {
            let doubled : int = i * 2;
            __print doubled;
        }
    "#;
    assert_eq!(run_output(source), ["0", "2", "4"]);
}

#[test]
fn same_name_in_sibling_blocks() {
    let source = "{ let v : int = 1; __print v; } { let v : string = \"two\"; __print v; }";
    assert_eq!(run_output(source), ["1", "two"]);
}

#[test]
fn function_locals_shadow_nothing_outside() {
    let source = r#"
        fun f() -> int { let x : int = 99; return x; }
        let x : int = 1;
        __print f();
        __print x;
    "#;
    assert_eq!(run_output(source), ["99", "1"]);
}
