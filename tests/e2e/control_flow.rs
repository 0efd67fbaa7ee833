//! End-to-end tests for control flow constructs

use crate::common::*;

#[test]
fn if_false_runs_nothing() {
    assert!(run_output("if (false) { __print 1; }").is_empty());
}

#[test]
fn if_else_takes_one_branch() {
    assert_eq!(run_output("if (1 > 2) { __print 1; } else { __print 2; }"), ["2"]);
    assert_eq!(run_output("if (2 > 1) { __print 1; } else { __print 2; }"), ["1"]);
}

#[test]
fn else_if_chain() {
    let source = r#"
        for (let n : int = 0; n < 3; n = n + 1) {
            if (n == 0) { __print "zero"; }
            else { if (n == 1) { __print "one"; } else { __print "many"; } }
        }
    "#;
    assert_eq!(run_output(source), ["zero", "one", "many"]);
}

#[test]
fn for_loop_runs_bound_times() {
    let output = run_output("for (let i : int = 0; i < 5; i = i + 1) { __print i; }");
    assert_eq!(output, ["0", "1", "2", "3", "4"]);
}

#[test]
fn for_loop_with_outer_counter() {
    let source = r#"
        let i : int = 10;
        for (i = 0; i < 3; i = i + 1) { }
        __print i;
    "#;
    assert_eq!(run_output(source), ["3"]);
}

#[test]
fn for_loop_without_step() {
    let source = "for (let i : int = 0; i < 3;) { __print i; i = i + 1; }";
    assert_eq!(run_output(source), ["0", "1", "2"]);
}

#[test]
fn while_loop_counts_down() {
    let source = "let n : int = 3; while (n > 0) { __print n; n = n - 1; }";
    assert_eq!(run_output(source), ["3", "2", "1"]);
}

#[test]
fn while_false_never_enters() {
    assert!(run_output("while (false) { __print 1; }").is_empty());
}

#[test]
fn nested_loops() {
    let source = r#"
        let total : int = 0;
        for (let a : int = 0; a < 4; a = a + 1) {
            for (let b : int = 0; b < 3; b = b + 1) {
                total = total + 1;
            }
        }
        __print total;
    "#;
    assert_eq!(run_output(source), ["12"]);
}

#[test]
fn frames_are_released() {
    let vm = run("for (let i : int = 0; i < 10; i = i + 1) { let sq : int = i * i; { let x : int = sq; } }");
    assert_eq!(vm.open_frames(), 0);
    assert!(vm.stack.is_empty());
}
