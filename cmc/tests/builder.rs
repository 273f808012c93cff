use cmc::ast::*;
use cmc::builder::Builder;
use cmc::error::Error;
use cmc::grammer;
use cmc::msg::{has_error, Msg};
use arch::inst::{Builtin, Const};

fn build(code: &str, lenient: bool) -> (Block, Vec<Msg>) {
    let (cst, errors) = grammer::parse(code);
    assert!(errors.is_empty(), "Parse errors: {:?}", errors);
    Builder::new(lenient).build(&cst)
}

fn assert(code: &str) -> Block {
    let (ast, msgs) = build(code, false);
    println!("{ast}");
    assert!(msgs.is_empty(), "Diagnostics: {:?}", msgs);
    ast
}

fn errors(code: &str, lenient: bool) -> Vec<Error> {
    let (_, msgs) = build(code, lenient);
    assert!(has_error(&msgs), "Expected errors for: {code}");
    msgs.into_iter().filter(Msg::is_error).map(|m| m.error).collect()
}

macro_rules! case {
    ($name:ident, $code:expr, $pat:pat) => {
        #[test]
        fn $name() {
            let errors = errors($code, false);
            println!("{:?}", errors);
            assert!(matches!(errors.as_slice(), [$pat]), "{:?}", errors);
        }
    };
}

case!(condition_arith, "while (x + 1) ;", Error::ConditionNotComparison(..));
case!(condition_ident, "if (x) x = 0;", Error::ConditionNotComparison(..));
case!(condition_call, "if (getint()) ;", Error::ConditionNotComparison(..));
case!(comparison_in_assign, "x = a < b;", Error::ComparisonAsValue(..));
case!(comparison_in_arg, "putint(a == b);", Error::ComparisonAsValue(..));
case!(comparison_in_operand, "while ((a < b) < c) ;", Error::ComparisonAsValue(..));
case!(unknown_type, "char c;", Error::UnknownType(..));
case!(unknown_type_init, "double d = 1;", Error::UnknownType(..));
case!(literal_big, "x = 6;", Error::LiteralOutOfRange(..));
case!(literal_small, "x = -2;", Error::LiteralOutOfRange(..));
case!(literal_float, "float f = 1.5;", Error::LiteralOutOfRange(..));
case!(literal_huge, "x = 99999999999999999999;", Error::LiteralOutOfRange(..));
case!(unknown_function, "print(1);", Error::UnknownFunction(..));
case!(putint_no_args, "putint();", Error::ArityMismatch(_, 1, 0, _));
case!(putint_two_args, "putint(1, 2);", Error::ArityMismatch(_, 1, 2, _));
case!(getint_args, "x = getint(1);", Error::ArityMismatch(_, 0, 1, _));

#[test]
fn every_item_is_checked() {
    // the loop reports both its condition and its body
    let errors = errors("x = 9;\nchar c;\nwhile (x) { putint(); }\nprint();", false);
    assert_eq!(errors.len(), 5, "{:?}", errors);
}

#[test]
fn body_errors_do_not_hide_condition_errors() {
    let errors = errors("while (x) { y = 7; }", false);
    assert_eq!(errors.len(), 2, "{:?}", errors);
}

fn first_error_at(code: &str) -> Option<(usize, usize)> {
    errors(code, false)[0].pos().map(|p| (p.row, p.col))
}

#[test]
fn error_positions() {
    assert_eq!(first_error_at("int x;\nx = 1 + 10;"), Some((1, 8)));
    assert_eq!(first_error_at("x = -7;"), Some((0, 4)));
    assert_eq!(first_error_at("if (x + 1) ;"), Some((0, 6)));
    assert_eq!(first_error_at("  foo(1);"), Some((0, 2)));
}

#[test]
fn lenient_downgrades_to_warnings() {
    let (ast, msgs) = build("x = 9;\nprint(1);\nputint();\nputint(1, 2);\nx = getint(3);", true);
    assert!(!has_error(&msgs), "{:?}", msgs);
    assert_eq!(msgs.len(), 5);
    assert!(msgs.iter().all(|m| m.note.is_some()));
    assert_eq!(
        ast.0[0],
        Item(Stmt::Assign(Assign {
            ident: format!("x"),
            expr: Expr::Number(Number {
                text: format!("9"),
                value: Const::C0,
            }),
        }))
    );
    assert_eq!(
        ast.0[1],
        Item(Stmt::Call(Call {
            callee: Callee::Unknown(format!("print")),
            args: vec![Expr::Number(Number {
                text: format!("1"),
                value: Const::C1,
            })],
        }))
    );
}

#[test]
fn lenient_keeps_structural_errors() {
    let errors = errors("if (x) ;\nchar c;\nx = a > b;", true);
    assert_eq!(errors.len(), 3, "{:?}", errors);
}

#[test]
fn negative_literal() {
    let ast = assert("x = -1;");
    assert_eq!(
        ast.0[0],
        Item(Stmt::Assign(Assign {
            ident: format!("x"),
            expr: Expr::Number(Number {
                text: format!("-1"),
                value: Const::M1,
            }),
        }))
    );
}

#[test]
fn declaration_with_init() {
    let ast = assert("int x = getint();");
    assert_eq!(
        ast.0[0],
        Item(Stmt::DeclInit(
            Decl {
                ident: format!("x"),
                ty: Type::Int,
            },
            Assign {
                ident: format!("x"),
                expr: Expr::Call(Call {
                    callee: Callee::Builtin(Builtin::GETINT),
                    args: vec![],
                }),
            },
        ))
    );
}

#[test]
fn bodies_are_blocks() {
    let ast = assert("while (x < 3) x = x + 1;\nif (x == 1) { ; } else ;");
    let Item(Stmt::While(w)) = &ast.0[0] else {
        panic!("not a loop");
    };
    assert_eq!(w.body.0.len(), 1);
    assert_eq!(w.cond.op, CmpOp::Lt);
    let Item(Stmt::If(i)) = &ast.0[1] else {
        panic!("not an if");
    };
    assert_eq!(i.then_body, Block(vec![]));
    assert_eq!(i.else_body, Some(Block(vec![])));
}

#[test]
fn empty_statements_dropped() {
    let ast = assert(";;int x;;");
    assert_eq!(ast.0.len(), 1);
}

#[test]
fn parenthesized_condition() {
    let ast = assert("if ((x >= 2)) ;");
    let Item(Stmt::If(i)) = &ast.0[0] else {
        panic!("not an if");
    };
    assert_eq!(i.cond.op, CmpOp::Ge);
    assert_eq!(i.cond.lhs, Expr::Ident(format!("x")));
}

#[test]
fn parens_leave_no_node() {
    let ast = assert("x = (1 + 2) * 3;");
    let Item(Stmt::Assign(assign)) = &ast.0[0] else {
        panic!("not an assignment");
    };
    let Expr::Arith(ArithOp::Mul, lhs, _) = &assign.expr else {
        panic!("not a product");
    };
    assert!(matches!(lhs.as_ref(), Expr::Arith(ArithOp::Add, _, _)));
}
