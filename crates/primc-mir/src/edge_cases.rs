//! End-to-end lowering scenarios over the full front end, plus the
//! program-level invariants: variable uniqueness, jump well-formedness,
//! break/continue binding and the call-return contract.

use std::collections::HashSet;

use primc_lex::{ErrorPolicy, Lexer};
use primc_par::Parser;
use primc_sem::Analyser;
use primc_util::diagnostic::Handler;

use crate::mir::{Op, Param, Program};
use crate::Generator;

fn compile(source: &str) -> Program {
    let (pool, lex_errors) = Lexer::new(source).tokenize(ErrorPolicy::Abort);
    assert!(lex_errors.is_empty(), "lex errors: {:?}", lex_errors);
    let ast = Parser::new(&pool).parse_program().unwrap();
    let handler = Handler::new();
    let (hir, errors) = Analyser::new(&handler).analyse(&ast);
    assert_eq!(errors, 0, "semantic errors: {:?}", handler.diagnostics());
    Generator::new(&hir).generate().unwrap()
}

/// Every `_T<n>` written by an ASSIGN destination or arithmetic result
/// within `program`, collected for the uniqueness check.
fn assigned_vars(program: &Program) -> Vec<usize> {
    program
        .iter()
        .filter_map(|q| match (q.op, q.res) {
            (Op::Assign | Op::Plus | Op::Minus | Op::Times | Op::Divide, Param::Var(id)) => {
                Some(id)
            }
            _ => None,
        })
        .collect()
}

fn assert_jumps_in_range(program: &Program) {
    for (idx, quad) in program.iter().enumerate() {
        if !quad.op.is_jump() {
            continue;
        }
        match quad.res {
            Param::Int(target) => {
                assert!(
                    target >= 0 && (target as usize) < program.len(),
                    "quad {} jumps out of range: {}",
                    idx,
                    quad
                );
            }
            // Returns jump through a variable, not an index.
            Param::Var(_) => {}
            other => panic!("quad {} has unresolved target {:?}", idx, other),
        }
    }
}

#[test]
fn s1_straight_line_main() {
    let mir = compile("void main() { int a; a = 1 + 2; return a; }");

    let stops: Vec<_> = mir.iter().filter(|q| q.op == Op::Stop).collect();
    assert_eq!(stops.len(), 1, "exactly one STOP:\n{}", mir);

    let pluses: Vec<_> = mir.iter().filter(|q| q.op == Op::Plus).collect();
    assert_eq!(pluses.len(), 1);

    // `a` resolves to a single variable: the declaration's target is
    // also the assignment's target and the STOP's result.
    let a_var = mir.quads[0].res;
    assert_eq!(mir.quads[0].op, Op::Assign);
    let last_assign = mir
        .iter()
        .filter(|q| q.op == Op::Assign)
        .last()
        .unwrap();
    assert_eq!(last_assign.res, a_var);
    assert_eq!(stops[0].res, a_var);

    assert_jumps_in_range(&mir);
}

#[test]
fn s2_call_trampoline() {
    let mir = compile(
        "int add(int x, int y) { return x + y; }\
         void main() { call add(3, 4); return; }",
    );

    // The JMP to the callee sits in main's sequence, and its target is
    // the callee's entry index in the concatenated program.
    let (jmp_idx, jmp) = mir
        .iter()
        .enumerate()
        .find(|(_, q)| q.op == Op::Jmp && q.comment.contains("call method"))
        .expect("call JMP present");
    let entry = match jmp.res {
        Param::Int(target) => target as usize,
        other => panic!("unpatched call target: {:?}", other),
    };
    assert!(entry < mir.len());
    assert!(mir.quads[entry].comment.contains("# method: add"));

    // The two formal copies appear immediately before the return-address
    // store, which itself precedes the JMP; after patching, the stored
    // resume address is the index right after the JMP.
    let ret_assign = &mir.quads[jmp_idx - 1];
    assert!(ret_assign.comment.contains("call returnTo"));
    assert_eq!(ret_assign.arg2, Param::Int(jmp_idx as i64 + 1));
    assert!(mir.quads[jmp_idx - 2].comment.contains("call param"));
    assert!(mir.quads[jmp_idx - 3].comment.contains("call param"));

    // The callee returns through the same variable the call site loaded.
    let ret_var = ret_assign.res;
    let method_return = mir
        .iter()
        .skip(entry)
        .find(|q| q.op == Op::Jmp && q.comment.contains("return value"))
        .expect("method return JMP");
    assert_eq!(method_return.res, ret_var);

    assert_jumps_in_range(&mir);
}

#[test]
fn s3_break_and_continue_binding() {
    let mir = compile(
        "void main() { int i; i = 0; \
         while (i < 10) { if (i == 5) break; continue; } \
         return; }",
    );

    let back_edge_idx = mir
        .iter()
        .position(|q| q.comment.starts_with("next loop:"))
        .expect("back-edge JMP present");

    let break_quad = mir
        .iter()
        .find(|q| q.comment == "_T_BREAK")
        .expect("break JMP present");
    assert_eq!(break_quad.res, Param::Int(back_edge_idx as i64 + 1));

    let continue_quad = mir
        .iter()
        .find(|q| q.comment == "_T_CONTINUE")
        .expect("continue JMP present");
    assert_eq!(continue_quad.res, Param::Int(back_edge_idx as i64));

    // The loop's condition test carries the marker and exits to the same
    // place break does.
    let cond_test = mir
        .iter()
        .find(|q| q.comment.starts_with("while condition"))
        .expect("condition marker present");
    assert_eq!(cond_test.res, break_quad.res);

    // The back edge returns to the first quad of the condition sequence.
    match mir.quads[back_edge_idx].res {
        Param::Int(target) => assert!((target as usize) < back_edge_idx),
        other => panic!("unpatched back edge: {:?}", other),
    }

    assert_jumps_in_range(&mir);
}

#[test]
fn s6_parenthesised_operands_evaluate_left_to_right() {
    let mir = compile(
        "void main() { int a, b, c, d, x; \
         x = (a + b) * (c - d); return x; }",
    );

    let plus_idx = mir.iter().position(|q| q.op == Op::Plus).unwrap();
    let minus_idx = mir.iter().position(|q| q.op == Op::Minus).unwrap();
    let times_idx = mir.iter().position(|q| q.op == Op::Times).unwrap();
    assert!(plus_idx < minus_idx && minus_idx < times_idx);

    // TIMES consumes exactly the two temporaries the PLUS and MINUS
    // produced.
    let times = &mir.quads[times_idx];
    assert_eq!(times.arg1, mir.quads[plus_idx].res);
    assert_eq!(times.arg2, mir.quads[minus_idx].res);
}

#[test]
fn variable_names_are_pairwise_distinct() {
    let mir = compile(
        "int square(int n) { int out; out = n * n; return out; }\
         void main() { int a, b; a = 2; b = 3; call square(a); return b; }",
    );
    // Fresh ids are assigned at declarations and temporaries; the only
    // repeats are re-assignments to an existing variable. Declarations
    // (Name operand) must all be distinct.
    let declared: Vec<_> = mir
        .iter()
        .filter(|q| matches!((q.op, q.arg2), (Op::Assign, Param::Name(_))))
        .map(|q| q.res)
        .collect();
    let unique: HashSet<_> = declared
        .iter()
        .map(|p| match p {
            Param::Var(id) => *id,
            other => panic!("declaration writes non-var {:?}", other),
        })
        .collect();
    assert_eq!(unique.len(), declared.len());

    // And no assigned id collides across methods with a different name's
    // declaration.
    assert!(!assigned_vars(&mir).is_empty());
}

#[test]
fn same_local_name_in_two_methods_gets_distinct_ids() {
    let mir = compile(
        "int f() { int t; t = 1; return t; }\
         void main() { int t; t = 2; call f(); return t; }",
    );
    let decls: Vec<_> = mir
        .iter()
        .filter(|q| matches!((q.op, q.arg2), (Op::Assign, Param::Name(_))))
        .map(|q| q.res)
        .collect();
    let unique: HashSet<_> = decls.iter().collect();
    assert_eq!(unique.len(), decls.len());
}

#[test]
fn jump_targets_resolved_in_range() {
    let mir = compile(
        "void main() { int i; i = 0; \
         while (i < 3 and i >= 0 or i == 7) { if (i == 1) i = i + 1; else continue; } \
         return i; }",
    );
    assert_jumps_in_range(&mir);
}

#[test]
fn and_short_circuits_over_right_operand() {
    let mir = compile(
        "void main() { int a, b; a = 1; b = 2; \
         if (a < 1 and b < 2) a = 3; b = 4; return; }",
    );
    // The jump over the right operand: JNZERO ... then ASSIGN 0, then a
    // JMP whose patched target is past the whole and-sequence.
    let jnz_idx = mir.iter().position(|q| q.op == Op::JNZero).unwrap();
    match mir.quads[jnz_idx].res {
        Param::Int(target) => assert_eq!(target, jnz_idx as i64 + 3),
        other => panic!("unpatched JNZERO: {:?}", other),
    }
    let over = &mir.quads[jnz_idx + 2];
    assert_eq!(over.op, Op::Jmp);
    match over.res {
        // Right comparison is 5 quads (one literal + four), so the jump
        // over it lands 10 past its own index.
        Param::Int(target) => assert_eq!(target, (jnz_idx + 2) as i64 + 10),
        other => panic!("unpatched jump-over: {:?}", other),
    }
    assert_jumps_in_range(&mir);
}

#[test]
fn uncalled_methods_are_not_lowered() {
    let mir = compile(
        "int unused(int x) { return x; }\
         void main() { return; }",
    );
    assert!(!mir.iter().any(|q| q.comment.contains("# method: unused")));
    assert_eq!(mir.len(), 1); // just the STOP
}

#[test]
fn methods_lower_lazily_in_first_call_order() {
    let mir = compile(
        "void first() { return; }\
         void second() { return; }\
         void main() { call second(); call first(); return; }",
    );
    let second_entry = mir
        .iter()
        .position(|q| q.comment.contains("# method: second"))
        .unwrap();
    let first_entry = mir
        .iter()
        .position(|q| q.comment.contains("# method: first"))
        .unwrap();
    assert!(second_entry < first_entry);
    assert_jumps_in_range(&mir);
}

#[test]
fn recursive_method_lowers_once() {
    let mir = compile(
        "int down(int n) { if (n > 0) call down(n - 1); else n = 0; return n; }\
         void main() { call down(3); return; }",
    );
    let entries = mir
        .iter()
        .filter(|q| q.comment.contains("# method: down"))
        .count();
    assert_eq!(entries, 1);
    assert_jumps_in_range(&mir);
}

#[test]
fn stop_carries_return_temporary() {
    let mir = compile("void main() { int a; a = 41 + 1; return a; }");
    let stop = mir.iter().find(|q| q.op == Op::Stop).unwrap();
    let a_var = mir.quads[0].res;
    assert_eq!(stop.res, a_var);
}

#[test]
fn patched_listing_round_trips_through_text() {
    let mir = compile(
        "int add(int x, int y) { return x + y; }\
         void main() { int a; a = 1 + 2; call add(a, 4); \
         while (a < 9) a = a + 1; return a; }",
    );
    let parsed: Program = mir.to_string().parse().expect("listing parses back");
    assert_eq!(parsed.quads, mir.quads);
}

#[test]
fn nested_loops_bind_breaks_to_their_own_loop() {
    let mir = compile(
        "void main() { int i, j; i = 0; j = 0; \
         while (i < 3) { while (j < 3) { break; } break; } \
         return; }",
    );
    let back_edges: Vec<usize> = mir
        .iter()
        .enumerate()
        .filter(|(_, q)| q.comment.starts_with("next loop:"))
        .map(|(idx, _)| idx)
        .collect();
    assert_eq!(back_edges.len(), 2);
    let (inner_back, outer_back) = (back_edges[0], back_edges[1]);

    let breaks: Vec<(usize, i64)> = mir
        .iter()
        .enumerate()
        .filter(|(_, q)| q.comment == "_T_BREAK")
        .map(|(idx, q)| match q.res {
            Param::Int(target) => (idx, target),
            other => panic!("unpatched break: {:?}", other),
        })
        .collect();
    assert_eq!(breaks.len(), 2);

    // The inner break exits just past the inner back edge; the outer
    // break just past the outer one.
    assert_eq!(breaks[0].1, inner_back as i64 + 1);
    assert_eq!(breaks[1].1, outer_back as i64 + 1);
    assert_jumps_in_range(&mir);
}
