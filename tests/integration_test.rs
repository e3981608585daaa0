// Integration tests for the PL/0 compiler pipeline

use pl0quad::ir::{Operand, Operator, RelOp, SymbolValue};
use pl0quad::report::{quad_program, symbol_report, token_report};
use pl0quad::snapshot::Replay;
use pl0quad::{compile, compile_with, CompileError, Options};

fn program_text(source: &str) -> String {
    let compilation = compile(source).expect("Compilation failed");
    quad_program(compilation.quads())
}

#[test]
fn test_scenario_assignment_of_sum() {
    let source = "PROGRAM p. VAR x; BEGIN x := 1 + 2 END.";
    let compilation = compile(source).expect("Compilation failed");

    let symbols = compilation.symbols();
    assert!(symbols.contains("x"));
    assert_eq!(symbols.temporary_count(), 1);
    assert_eq!(symbols.len(), 2);

    let quads = compilation.quads();
    assert_eq!(quads.len(), 2);
    assert_eq!(quads[0].op, Operator::Add);
    assert_eq!(quads[0].arg1, Operand::Int(1));
    assert_eq!(quads[0].arg2, Operand::Int(2));
    assert_eq!(quads[0].result, Operand::name("#TEMP1"));
    assert_eq!(quads[1].op, Operator::Assign);
    assert_eq!(quads[1].arg1, Operand::name("#TEMP1"));
    assert_eq!(quads[1].arg2, Operand::Empty);
    assert_eq!(quads[1].result, Operand::name("x"));
}

#[test]
fn test_scenario_while_loop() {
    let source = "PROGRAM p. VAR x; WHILE x < 10 DO x := x + 1.";
    let compilation = compile(source).expect("Compilation failed");
    let quads = compilation.quads();

    let first_relational = quads
        .iter()
        .find(|q| matches!(q.op, Operator::Rel(_)))
        .expect("no relational quadruple");
    let last = quads.last().expect("no quadruples");
    assert_eq!(last.op, Operator::Jmp);
    assert_eq!(last.target(), Some(first_relational.line));

    assert_eq!(
        quad_program(quads),
        "1: (<, x, 10, 4)\n\
         2: (:=, 0, _, #TEMP1)\n\
         3: (jmp, _, _, 5)\n\
         4: (:=, 1, _, #TEMP1)\n\
         5: (je, #TEMP1, _, 9)\n\
         6: (+, x, 1, #TEMP2)\n\
         7: (:=, #TEMP2, _, x)\n\
         8: (jmp, _, _, 1)\n"
    );
}

#[test]
fn test_scenario_missing_semicolon() {
    let err = compile("PROGRAM p VAR x END.").unwrap_err();
    assert!(matches!(err, CompileError::Syntax(_)), "{:?}", err);
    assert!(err.to_string().contains("';'"));

    let err = compile("PROGRAM p VAR x; END.").unwrap_err();
    assert!(matches!(err, CompileError::Syntax(_)), "{:?}", err);
}

#[test]
fn test_lexical_error_aborts_run() {
    let err = compile("VAR x;\nx := 1;\ny := x ? 2.").unwrap_err();
    match err {
        CompileError::Lex(lex) => {
            assert_eq!(lex.location.line, 3);
            assert!(lex.message.contains('?'));
        }
        other => panic!("Expected lexical error, got {:?}", other),
    }
}

#[test]
fn test_boolean_materialization() {
    let source = "VAR a, b, c; BEGIN c := 0; IF a < b THEN c := 1 END.";
    let compilation = compile(source).expect("Compilation failed");
    let quads = compilation.quads();

    let relational: Vec<_> = quads
        .iter()
        .filter(|q| matches!(q.op, Operator::Rel(_)))
        .collect();
    assert_eq!(relational.len(), 1);

    let rel = relational[0];
    let at = rel.line - 1;
    assert_eq!(rel.op, Operator::Rel(RelOp::Lt));
    assert_eq!(rel.target(), Some(rel.line + 3));

    let temp = Operand::name("#TEMP1");
    assert_eq!(quads[at + 1].op, Operator::Assign);
    assert_eq!(quads[at + 1].arg1, Operand::Int(0));
    assert_eq!(quads[at + 1].result, temp);
    assert_eq!(quads[at + 2].op, Operator::Jmp);
    assert_eq!(quads[at + 2].target(), Some(quads[at + 2].line + 2));
    assert_eq!(quads[at + 3].op, Operator::Assign);
    assert_eq!(quads[at + 3].arg1, Operand::Int(1));
    assert_eq!(quads[at + 3].result, temp);
}

#[test]
fn test_while_exit_lands_after_body() {
    let source = r#"
        VAR i, s;
        BEGIN
            WHILE i < 5 DO
            BEGIN
                s := s + i;
                i := i + 1
            END;
            s := s * 2
        END.
    "#;
    let compilation = compile(source).expect("Compilation failed");
    let quads = compilation.quads();

    let exit = quads
        .iter()
        .find(|q| q.op == Operator::Je)
        .expect("no conditional skip");
    let back_jump = quads
        .iter()
        .rev()
        .find(|q| q.op == Operator::Jmp && q.target() == Some(1))
        .expect("no loop back-edge");

    // The first quadruple after the loop is the one computing `s * 2`
    assert_eq!(exit.target(), Some(back_jump.line + 1));
    let after = &quads[back_jump.line];
    assert_eq!(after.op, Operator::Mul);
}

#[test]
fn test_procedures_are_inlined_in_source_order() {
    let source = r#"
        PROGRAM demo;
        CONST limit = 3;
        VAR n, total;
        PROCEDURE bump;
            total := total + n;
        BEGIN
            n := limit;
            CALL bump
        END.
    "#;
    let compilation = compile(source).expect("Compilation failed");

    assert_eq!(
        quad_program(compilation.quads()),
        "1: (+, total, n, #TEMP1)\n\
         2: (:=, #TEMP1, _, total)\n\
         3: (:=, limit, _, n)\n"
    );
    assert_eq!(
        compilation.symbols().get("limit").map(|s| s.value),
        Some(SymbolValue::Const(3))
    );
}

#[test]
fn test_pinned_expression_quirks() {
    // At most two terms per expression
    assert!(compile("VAR a, b, c, x; x := a + b + c.").is_err());
    assert!(compile("VAR a, b, c, x; x := a * b * c.").is_err());
    assert!(compile("VAR a, b, c, x; x := (a + b) + c.").is_ok());

    // A leading minus without a following operator is dropped
    assert_eq!(program_text("VAR x; x := -5."), "1: (:=, 5, _, x)\n");

    // With a following operator the binary result is negated
    assert_eq!(
        program_text("VAR a, b, x; x := -a + b."),
        "1: (+, a, b, #TEMP1)\n2: (@, #TEMP1, _, #TEMP2)\n3: (:=, #TEMP2, _, x)\n"
    );

    // ODD generates nothing
    assert_eq!(
        program_text("VAR x; IF ODD x THEN x := 1."),
        "1: (je, _, _, 3)\n2: (:=, 1, _, x)\n"
    );
}

#[test]
fn test_reports_for_small_program() {
    let compilation = compile("CONST k = 2;\nVAR x;\nx := k * 3.").expect("Compilation failed");

    assert_eq!(
        token_report(compilation.tokens()),
        "tokens:\n(CONST, _)\n(ident, k)\n(=, _)\n(const, 2)\n(;, _)\n\
         (VAR, _)\n(ident, x)\n(;, _)\n\
         (ident, x)\n(:=, _)\n(ident, k)\n(*, _)\n(const, 3)\n(., _)\n(EOF, _)\n"
    );
    assert_eq!(
        symbol_report(compilation.symbols()),
        "symbols:\nk: 2\nx: 0\n#TEMP1: _\n"
    );
}

#[test]
fn test_history_matches_final_output() {
    let options = Options {
        record_history: true,
        ..Options::default()
    };
    let source = "VAR x; WHILE x < 10 DO x := x + 1.";
    let compilation = compile_with(source, &options).expect("Compilation failed");
    let history = compilation.history().expect("history was not recorded");

    // start + declare + 2 temporaries + 8 emits + 1 backpatch
    assert_eq!(history.len(), 13);
    assert!(!history.is_truncated());

    let last = history.last().expect("empty history");
    assert_eq!(last.quads, compilation.quads());

    // Snapshots only ever grow the quadruple list
    let lengths: Vec<usize> = history.iter().map(|s| s.quads.len()).collect();
    assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_history_limit_truncates_without_failing() {
    let options = Options {
        record_history: true,
        history_limit: 1,
    };
    let compilation = compile_with("VAR x; x := 1 + 2.", &options).expect("Compilation failed");
    let history = compilation.history().expect("history was not recorded");

    assert!(history.is_truncated());
    assert_eq!(history.len(), 1);
    assert_eq!(compilation.quads().len(), 2);

    let replay = Replay::new(compilation).expect("truncated history should still replay");
    assert!(replay.is_truncated());
    assert_eq!(replay.total_snapshots(), 1);
    assert!(replay.is_at_end());
}

#[test]
fn test_demo_programs_compile() {
    let demos = [
        include_str!("../demos/loop.pl0"),
        include_str!("../demos/nested.pl0"),
    ];
    for source in demos {
        let compilation = compile(source).expect("Compilation failed");
        assert!(!compilation.quads().is_empty());
        assert!(compilation
            .quads()
            .iter()
            .all(|q| q.target() != Some(0)));
    }
}
