//! Semantic analysis integration tests

use parlc::ast::{ExprKind, Stmt, Type};
use parlc::sema::table::SymbolKind;

use crate::common::*;

#[test]
fn expressions_are_annotated_with_types() {
    let (program, _) = analyze_only("let b : bool = 1.5 * 2.0 > 2.0;").unwrap();
    let Stmt::Assignment { value, .. } = &program.block.stmts[0].node else {
        panic!("expected a declaration");
    };
    assert_eq!(value.ty, Some(Type::Bool));
    let ExprKind::Binary { left, .. } = &value.kind else {
        panic!("expected a comparison");
    };
    assert_eq!(left.ty, Some(Type::Float));
}

#[test]
fn program_slots_in_declaration_order() {
    let (_, info) = analyze_only("let a : int = 1; let b : colour; let c : string = \"s\";").unwrap();
    let slots: Vec<_> = info
        .table
        .entries()
        .iter()
        .map(|entry| (entry.name.as_str(), entry.index, entry.level))
        .collect();
    assert_eq!(slots, [("a", 0, 0), ("b", 1, 0), ("c", 2, 0)]);
}

#[test]
fn nested_blocks_restart_slot_numbering() {
    let (_, info) = analyze_only("let a : int = 1; { let b : int = 2; let c : int = 3; }").unwrap();
    let c = info.table.entries().iter().find(|e| e.name == "c").unwrap();
    assert_eq!((c.index, c.level), (1, 1));
}

#[test]
fn function_frame_holds_params_then_locals() {
    let (_, info) = analyze_only(
        "fun f(x : int, y : int) -> int { let s : int = x + y; if (s > 0) { let t : int = s; } return s; }",
    )
    .unwrap();
    let f = info.function("f").unwrap();
    assert_eq!(f.signature.params, [Type::Int, Type::Int]);
    assert_eq!(f.signature.returns, Some(Type::Int));
    // t lives in the if-block frame, not the function frame
    assert_eq!(f.frame_size(), 3);

    let kinds: Vec<_> = f.table.entries().iter().map(|e| (e.name.as_str(), e.kind)).collect();
    assert_eq!(
        kinds,
        [
            ("x", SymbolKind::Parameter),
            ("y", SymbolKind::Parameter),
            ("s", SymbolKind::Variable),
            ("t", SymbolKind::Variable),
        ]
    );
}

#[test]
fn functions_callable_before_definition() {
    assert!(analyze_only("__print twice(4); fun twice(n : int) -> int { return n * 2; }").is_ok());
}

#[test]
fn mutual_recursion() {
    let source = r#"
        fun even(n : int) -> bool { if (n == 0) { return true; } return odd(n - 1); }
        fun odd(n : int) -> bool { if (n == 0) { return false; } return even(n - 1); }
        __print even(10);
    "#;
    assert!(analyze_only(source).is_ok());
}

#[test]
fn function_and_variable_may_share_a_name() {
    assert!(analyze_only("fun v() -> int { return 1; } let v : int = v();").is_ok());
}

#[test]
fn shadowing_in_inner_block() {
    assert!(analyze_only("let x : int = 1; { let x : bool = true; __print x; }").is_ok());
}

#[test]
fn every_mention_is_resolved() {
    let (_, info) = analyze_only("let a : int = 1; a = a + 1; __print a;").unwrap();
    // declaration, reassignment target, two reads
    assert_eq!(info.resolved.len(), 4);
    assert!(info.resolved.values().all(|entry| entry.name == "a"));
}

#[test]
fn return_anywhere_in_body_is_enough() {
    assert!(analyze_only("fun f(b : bool) -> int { if (b) { return 1; } }").is_ok());
    assert!(analyze_only("fun g() -> int { while (true) { return 2; } }").is_ok());
}

#[test]
fn return_on_every_branch() {
    assert!(analyze_only("fun sign(n : int) -> int { if (n < 0) { return -1; } else { return 1; } }").is_ok());
}

#[test]
fn print_accepts_every_type() {
    assert!(analyze_only("__print 1; __print 1.0; __print true; __print #123456; __print \"s\";").is_ok());
}

#[test]
fn colour_equality_is_allowed() {
    assert!(analyze_only("let b : bool = (__read 0, 0) == #000000;").is_ok());
}
