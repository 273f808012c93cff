use arch::alu::Cmp;
use arch::asm::Program;
use arch::inst::{Const, Inst, Line};
use cmc::ast::CmpOp;
use cmc::label::LabelAllocator;
use cmc::{compile, compile_with, Config};
use emu::{Buffer, State};
use std::collections::HashSet;
use strum::IntoEnumIterator;

const PROGRAM: &str = "\
int x = getint();
while (x < 5) {
    if (x == 2) { putint(x); } else { putint(0); }
    if (x > 3) putint(1);
    x = x + 1;
}
if (x != 5) { while (x >= 0) { x = x - 1; } }";

fn execute(lines: &[Line], input: Vec<i32>) -> Vec<i32> {
    let program = Program::from_lines(lines).unwrap();
    let mut state = State::new(program);
    let mut console = Buffer::new(input);
    state.run(&mut console, 10_000).unwrap();
    console.output
}

#[test]
fn deterministic() {
    let config = Config::default();
    let first = compile(PROGRAM, &config).unwrap().lines;
    let second = compile(PROGRAM, &config).unwrap().lines;
    assert_eq!(first, second);
}

#[test]
fn shared_counter_drifts_until_reset() {
    let config = Config::default();
    let mut labels = LabelAllocator::new();
    let first = compile_with(PROGRAM, &config, &mut labels).unwrap().lines;
    let drifted = compile_with(PROGRAM, &config, &mut labels).unwrap().lines;
    assert_ne!(first, drifted);
    labels.reset();
    let again = compile_with(PROGRAM, &config, &mut labels).unwrap().lines;
    assert_eq!(first, again);
}

#[test]
fn labels_unique() {
    let lines = compile(PROGRAM, &Config::default()).unwrap().lines;
    let labels: Vec<&String> = lines
        .iter()
        .filter_map(|line| match line {
            Line::Label(name) => Some(name),
            Line::Inst(_) => None,
        })
        .collect();
    // 2 loops and 1 if/else with two labels each, 2 ifs with one
    assert_eq!(labels.len(), 2 * 2 + 2 + 2);
    let distinct: HashSet<&String> = labels.iter().copied().collect();
    assert_eq!(distinct.len(), labels.len());

    // one number per structured node
    let numbers: HashSet<&str> = labels
        .iter()
        .filter_map(|name| name.rsplit('_').next())
        .collect();
    assert_eq!(numbers.len(), 5);

    // every jump target is defined
    for line in &lines {
        if let Line::Inst(Inst::IF(_, target) | Inst::GOTO(target)) = line {
            assert!(distinct.contains(target), "undefined label {target}");
        }
    }
}

#[test]
fn program_runs() {
    let lines = compile(PROGRAM, &Config::default()).unwrap().lines;
    assert_eq!(execute(&lines, vec![0]), vec![0, 0, 2, 0, 0, 1]);
    assert_eq!(execute(&lines, vec![7]), Vec::<i32>::new());
}

#[test]
fn branch_is_negated_comparison() {
    for op in CmpOp::iter() {
        let code = format!("if (a {op} b) putint(1);");
        let lines = compile(&code, &Config::default()).unwrap().lines;
        let branch = lines.iter().find_map(|line| match line {
            Line::Inst(Inst::IF(cmp, _)) => Some(*cmp),
            _ => None,
        });
        assert_eq!(branch, Some(Cmp::from(op).negate()), "{op}");
    }
}

#[test]
fn negation_matches_source_semantics() {
    let holds = |op: CmpOp, a: i32, b: i32| match op {
        CmpOp::Eq => a == b,
        CmpOp::Ne => a != b,
        CmpOp::Lt => a < b,
        CmpOp::Le => a <= b,
        CmpOp::Gt => a > b,
        CmpOp::Ge => a >= b,
    };
    for op in CmpOp::iter() {
        let code = format!(
            "int a = getint();\nint b = getint();\nif (a {op} b) {{ putint(1); }} else {{ putint(0); }}"
        );
        let lines = compile(&code, &Config::default()).unwrap().lines;
        for (a, b) in [(0, 0), (1, 2), (2, 1), (-1, 5), (5, -1), (3, 3)] {
            let taken = execute(&lines, vec![a, b]) == vec![1];
            assert_eq!(taken, holds(op, a, b), "{a} {op} {b}");
        }
    }
}

#[test]
fn literals_round_trip() {
    for value in Const::MIN..=Const::MAX {
        let code = format!("putint({value});");
        let lines = compile(&code, &Config::default()).unwrap().lines;
        assert_eq!(lines.len(), 2);
        assert_eq!(execute(&lines, vec![]), vec![value as i32]);
    }
    for value in [Const::MIN - 1, Const::MAX + 1] {
        let code = format!("putint({value});");
        assert!(compile(&code, &Config::default()).is_err());
    }
}

#[test]
fn render_idempotent() {
    let compiled = compile(PROGRAM, &Config::default()).unwrap();
    let before = compiled.ast.to_string();
    let again = compile(PROGRAM, &Config::default()).unwrap();
    assert_eq!(before, compiled.ast.to_string());
    assert_eq!(before, again.ast.to_string());
}
