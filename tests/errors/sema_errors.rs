//! Semantic analysis error tests
//!
//! Tests for type errors, undefined symbols, redeclarations and misplaced
//! returns

use crate::common::*;

// ============================================================================
// Type Errors
// ============================================================================

#[test]
fn declaration_type_mismatch() {
    assert_error_contains("let x : int = true;", "expected int, found bool");
}

#[test]
fn reassignment_type_mismatch() {
    assert_error_contains("let x : float = 1.0; x = 2;", "expected float, found int");
}

#[test]
fn no_implicit_int_to_float() {
    assert_error_contains("let f : float = 1.0 + 2;", "cannot apply '+' to float and int");
}

#[test]
fn condition_must_be_bool() {
    assert_error_contains("if (1) { }", "expected bool, found int");
    assert_error_contains("while (#000000) { }", "expected bool, found colour");
}

#[test]
fn logical_operators_need_bool() {
    assert_error_contains("let b : bool = 1 and 2;", "cannot apply 'and' to int and int");
}

#[test]
fn not_needs_bool() {
    assert_error_contains("let b : bool = not 3;", "cannot apply 'not' to int");
}

#[test]
fn colour_has_no_ordering() {
    assert_sema_error("let b : bool = #000000 < #ffffff;");
}

#[test]
fn write_wants_colour_last() {
    assert_error_contains("__write 1, 2, 3;", "expected colour, found int");
}

#[test]
fn random_int_wants_int() {
    assert_error_contains("let r : int = __random_int 2.5;", "expected int, found float");
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn undefined_variable() {
    assert_error_contains("__print y;", "undefined variable 'y'");
}

#[test]
fn variable_out_of_scope_after_block() {
    assert_error_contains("{ let x : int = 1; } __print x;", "undefined variable 'x'");
}

#[test]
fn for_variable_not_visible_after_loop() {
    assert_error_contains(
        "for (let i : int = 0; i < 3; i = i + 1) { } __print i;",
        "undefined variable 'i'",
    );
}

#[test]
fn initializer_cannot_see_own_name() {
    assert_error_contains("let x : int = x + 1;", "undefined variable 'x'");
}

#[test]
fn redeclaration_in_same_scope() {
    let source = "let x : int = 1;\nlet x : int = 2;";
    assert_error_contains(source, "'x' is already declared in this scope");
    assert_error_contains(source, "previously declared at 1:5");
}

#[test]
fn parameter_redeclared_in_body() {
    assert_error_contains(
        "fun f(a : int) { let a : int = 2; }",
        "'a' is already declared in this scope",
    );
}

#[test]
fn duplicate_function() {
    assert_error_contains("fun f() { } fun f() { }", "'f' is already declared");
}

#[test]
fn undefined_function() {
    assert_error_contains("g();", "undefined function 'g'");
}

#[test]
fn globals_not_visible_inside_functions() {
    assert_error_contains(
        "let g : int = 1; fun f() -> int { return g; }",
        "undefined variable 'g'",
    );
}

// ============================================================================
// Calls and Returns
// ============================================================================

#[test]
fn call_arity() {
    assert_error_contains(
        "fun f(a : int, b : int) { } f(1);",
        "'f' expects 2 argument(s), found 1",
    );
}

#[test]
fn call_argument_type() {
    assert_error_contains(
        "fun f(a : int, b : bool) { } f(1, 2);",
        "argument 2 of 'f' must be bool, found int",
    );
}

#[test]
fn void_call_as_value() {
    assert_error_contains("fun f() { } let x : int = f();", "'f' does not return a value");
}

#[test]
fn return_value_from_void_function() {
    assert_error_contains(
        "fun f() { return 1; }",
        "return type mismatch: expected void, found int",
    );
}

#[test]
fn bare_return_in_typed_function() {
    assert_error_contains(
        "fun f() -> int { return; }",
        "return type mismatch: expected int, found void",
    );
}

#[test]
fn return_at_top_level() {
    assert_error_contains("return 1;", "return statement outside function");
}

#[test]
fn missing_return() {
    assert_error_contains(
        "fun f() -> int { let x : int = 1; }",
        "function 'f' returns int but has no return statement",
    );
}

#[test]
fn nested_function() {
    assert_error_contains(
        "if (true) { fun inner() { } }",
        "function 'inner' must be defined at the top level",
    );
}

#[test]
fn error_heading_and_location() {
    let source = "let a : int = 1;\nlet b : bool = a;";
    let CompileResult::SemaError(message) = compile(source) else {
        panic!("expected a semantic error");
    };
    assert!(message.starts_with("error: type mismatch"), "{}", message);
    assert!(message.contains("2:"), "{}", message);
}
