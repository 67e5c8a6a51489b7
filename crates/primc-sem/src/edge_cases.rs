//! Analyser behaviour against whole programs.

use primc_lex::{ErrorPolicy, Lexer};
use primc_par::Parser;
use primc_util::diagnostic::{Handler, Level};

use crate::hir;
use crate::Analyser;

fn analyse(source: &str) -> (hir::Program, usize, Handler) {
    let (pool, errors) = Lexer::new(source).tokenize(ErrorPolicy::Abort);
    assert!(errors.is_empty(), "lex errors: {:?}", errors);
    let ast = Parser::new(&pool).parse_program().unwrap();
    let handler = Handler::new();
    let (program, count) = Analyser::new(&handler).analyse(&ast);
    (program, count, handler)
}

fn warnings(handler: &Handler) -> Vec<String> {
    handler
        .diagnostics()
        .into_iter()
        .filter(|d| d.level == Level::Warning)
        .map(|d| d.message)
        .collect()
}

#[test]
fn valid_program_has_no_errors() {
    let (program, count, handler) = analyse(
        "int add(int x, int y) { return x + y; }\
         void main() { call add(3, 4); return; }",
    );
    assert_eq!(count, 0);
    assert!(!handler.has_errors());
    assert_eq!(program.methods.len(), 2);
}

#[test]
fn missing_main_is_an_error() {
    let (_, count, handler) = analyse("void helper() { return; }");
    assert_eq!(count, 1);
    assert!(handler
        .diagnostics()
        .iter()
        .any(|d| d.message.contains("main method is missing")));
}

#[test]
fn calling_main_is_exactly_one_error() {
    // S4: `call main();` anywhere reports exactly one error and the call
    // does not survive into the HIR.
    let (program, count, _handler) = analyse("void main() { call main(); }");
    assert_eq!(count, 1);
    assert!(program.methods.is_empty());
}

#[test]
fn unused_method_is_one_warning_no_errors() {
    // S5: a never-called method compiles clean with one warning.
    let (_, count, handler) = analyse(
        "int unused(int x) { return x; }\
         void main() { return; }",
    );
    assert_eq!(count, 0);
    let warned = warnings(&handler);
    assert_eq!(warned.len(), 1);
    assert!(warned[0].contains("unused"));
    assert!(warned[0].contains("never called"));
}

#[test]
fn main_is_never_reported_unused() {
    let (_, count, handler) = analyse("void main() { return; }");
    assert_eq!(count, 0);
    assert!(warnings(&handler).is_empty());
}

#[test]
fn unused_variable_warning() {
    let (_, count, handler) = analyse("void main() { int t; return; }");
    assert_eq!(count, 0);
    let warned = warnings(&handler);
    assert_eq!(warned.len(), 1);
    assert!(warned[0].contains("t is never used"));
}

#[test]
fn used_variable_not_warned() {
    let (_, count, handler) = analyse("void main() { int t; t = 1; return t; }");
    assert_eq!(count, 0);
    assert!(warnings(&handler).is_empty());
}

#[test]
fn parameters_are_in_scope() {
    let (_, count, _) = analyse(
        "int twice(int x) { return x + x; }\
         void main() { call twice(2); }",
    );
    assert_eq!(count, 0);
}

#[test]
fn undeclared_assignment_target_is_an_error() {
    let (_, count, _) = analyse("void main() { a = 1; }");
    assert_eq!(count, 1);
}

#[test]
fn undeclared_factor_is_an_error() {
    let (_, count, _) = analyse("void main() { int a; a = b + 1; }");
    assert_eq!(count, 1);
}

#[test]
fn duplicate_local_is_an_error() {
    let (_, count, _) = analyse("void main() { int a; int a; }");
    assert_eq!(count, 1);
}

#[test]
fn duplicate_parameter_is_an_error() {
    let (_, count, _) = analyse(
        "void f(int x, int x) { return; }\
         void main() { return; }",
    );
    assert_eq!(count, 1);
}

#[test]
fn duplicate_method_is_an_error() {
    let (_, count, _) = analyse(
        "void f() { return; }\
         void f() { return; }\
         void main() { return; }",
    );
    assert_eq!(count, 1);
}

#[test]
fn call_before_declaration_is_an_error() {
    // Methods must be declared before the call site; the table is filled
    // in program order.
    let (_, count, _) = analyse(
        "void main() { call later(); }\
         void later() { return; }",
    );
    assert_eq!(count, 1);
}

#[test]
fn arity_mismatch_is_an_error() {
    let (_, count, handler) = analyse(
        "int add(int x, int y) { return x + y; }\
         void main() { call add(1); }",
    );
    assert_eq!(count, 1);
    assert!(handler
        .diagnostics()
        .iter()
        .any(|d| d.message.contains("wrong number of parameters")));
}

#[test]
fn recursive_call_resolves_and_arity_checks() {
    let (_, count, _) = analyse(
        "int down(int n) { if (n > 0) call down(n - 1); return n; }\
         void main() { call down(3); }",
    );
    assert_eq!(count, 0);
}

#[test]
fn recursive_call_with_wrong_arity_is_an_error() {
    let (_, count, _) = analyse(
        "int down(int n) { call down(); return n; }\
         void main() { return; }",
    );
    assert_eq!(count, 1);
}

#[test]
fn method_used_as_variable_is_an_error() {
    let (_, count, handler) = analyse(
        "int f(int x) { return x; }\
         void main() { int a; a = f + 1; }",
    );
    assert_eq!(count, 1);
    assert!(handler
        .diagnostics()
        .iter()
        .any(|d| d.message.contains("is a method, but used as a variable")));
}

#[test]
fn break_continue_outside_loop_pass_analysis() {
    // The analyser accepts them anywhere; the MIR generator rejects
    // orphans later.
    let (program, count, _) = analyse("void main() { break; continue; return; }");
    assert_eq!(count, 0);
    assert_eq!(program.methods.len(), 1);
}

#[test]
fn failed_method_is_rolled_back_and_rest_continue() {
    let (program, count, _) = analyse(
        "void bad() { x = 1; }\
         void good() { return; }\
         void main() { call good(); }",
    );
    assert_eq!(count, 1);
    let names: Vec<_> = program
        .methods
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["good", "main"]);
}

#[test]
fn call_to_invalid_method_is_an_error() {
    // `bad` fails validation and is rolled back, so calling it fails too.
    let (_, count, _) = analyse(
        "void bad() { x = 1; }\
         void main() { call bad(); }",
    );
    assert_eq!(count, 2);
}

#[test]
fn errors_count_per_method() {
    // One error per failed method: analysis aborts a method at its first
    // error and moves on.
    let (_, count, _) = analyse(
        "void a() { x = 1; y = 2; }\
         void b() { z = 3; }\
         void main() { return; }",
    );
    assert_eq!(count, 2);
}

#[test]
fn every_method_is_either_called_or_warned() {
    // Unused tracking is a partition: each valid method other than main
    // is either called somewhere or reported as never called.
    let (program, count, handler) = analyse(
        "void used() { return; }\
         void idle_one() { return; }\
         void idle_two() { return; }\
         void main() { call used(); return; }",
    );
    assert_eq!(count, 0);
    let warned: Vec<_> = warnings(&handler);
    assert_eq!(warned.len(), 2);
    for method in &program.methods {
        let name = method.name.as_str();
        if name == "main" || name == "used" {
            assert!(!warned.iter().any(|w| w.contains(name)));
        } else {
            assert!(warned.iter().any(|w| w.contains(name)));
        }
    }
}

#[test]
fn warning_order_follows_declaration_order() {
    let (_, _, handler) = analyse(
        "void zebra() { return; }\
         void apple() { return; }\
         void main() { return; }",
    );
    let warned = warnings(&handler);
    assert_eq!(warned.len(), 2);
    assert!(warned[0].contains("zebra"));
    assert!(warned[1].contains("apple"));
}

#[test]
fn hir_shapes_are_normalised() {
    let (program, count, _) = analyse("void main() { int a; a = (1 + 2) * 3; return a; }");
    assert_eq!(count, 0);
    let main = program.method(primc_util::symbol::kw::MAIN).unwrap();
    let statements = match &main.body {
        hir::Stmt::Block { statements } => statements,
        other => panic!("expected block body, got {:?}", other),
    };
    match &statements[1] {
        hir::Stmt::Assign { value, .. } => match value {
            hir::Exp::Term(hir::Term::Binary { left, op, right }) => {
                assert_eq!(*op, hir::OpTag::Times);
                assert!(matches!(left, hir::Factor::Exp(_)));
                assert!(matches!(right, hir::Factor::Int(3)));
            }
            other => panic!("unexpected value shape: {:?}", other),
        },
        other => panic!("expected assignment, got {:?}", other),
    }
}
