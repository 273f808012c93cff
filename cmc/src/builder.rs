//! Parse tree to validated syntax tree.
//!
//! Every diagnostic of the program is collected. An item with an error is
//! dropped from its block and building carries on with the next one, so a
//! single run reports all problems. In lenient mode literals, unknown calls
//! and arity mismatches are downgraded to warnings and compiled the way the
//! old tool did. Conditions and type tags are checked in every mode.

use crate::ast::*;
use crate::error::Error;
use crate::grammer::cst;
use crate::grammer::token::Pos;
use crate::msg::Msg;
use arch::inst::{Builtin, Const};
use itertools::Itertools;

pub struct Builder {
    lenient: bool,
    msgs: Vec<Msg>,
}

impl Builder {
    pub fn new(lenient: bool) -> Self {
        Builder {
            lenient,
            msgs: Vec::new(),
        }
    }

    pub fn build(mut self, program: &cst::Program) -> (Block, Vec<Msg>) {
        let block = self.build_items(&program.0);
        (block, self.msgs)
    }

    /// Errors downgrade to warnings in lenient mode
    fn degrade(&mut self, error: Error, note: &str) -> Result<(), Error> {
        if self.lenient {
            self.msgs.push(Msg::warn(error).with_note(note));
            Ok(())
        } else {
            Err(error)
        }
    }
}

// ----------------------------------------------------------------------------
// Blocks and statements
// ----------------------------------------------------------------------------

impl Builder {
    fn build_items(&mut self, items: &[cst::BlockItem]) -> Block {
        let mut block = Vec::new();
        for item in items {
            match self.build_item(item) {
                Ok(Some(stmt)) => block.push(Item(stmt)),
                Ok(None) => {}
                Err(e) => self.msgs.push(Msg::error(e)),
            }
        }
        Block(block)
    }

    fn build_item(&mut self, item: &cst::BlockItem) -> Result<Option<Stmt>, Error> {
        match item {
            cst::BlockItem::Declaration(decl) => self.build_declaration(decl).map(Some),
            cst::BlockItem::Statement(stmt) => self.build_statement(stmt),
        }
    }

    fn build_declaration(&mut self, decl: &cst::Declaration) -> Result<Stmt, Error> {
        let ty_text = &decl.type_specifier;
        let ty = ty_text
            .text
            .parse::<Type>()
            .map_err(|_| Error::UnknownType(ty_text.text.clone(), ty_text.pos))?;
        let ident = decl.declarator.identifier.text.clone();
        let declaration = Decl {
            ident: ident.clone(),
            ty,
        };
        match &decl.declarator.init {
            None => Ok(Stmt::Decl(declaration)),
            Some(init) => {
                let expr = self.build_expr(init)?;
                Ok(Stmt::DeclInit(declaration, Assign { ident, expr }))
            }
        }
    }

    /// `None` for the empty statement
    fn build_statement(&mut self, stmt: &cst::Statement) -> Result<Option<Stmt>, Error> {
        match stmt {
            cst::Statement::Simple(cst::SimpleStatement::Empty) => Ok(None),
            cst::Statement::Simple(cst::SimpleStatement::Assignment(ident, expr)) => {
                let expr = self.build_expr(expr)?;
                Ok(Some(Stmt::Assign(Assign {
                    ident: ident.text.clone(),
                    expr,
                })))
            }
            cst::Statement::Simple(cst::SimpleStatement::Funcall(call)) => {
                Ok(Some(Stmt::Call(self.build_call(call)?)))
            }
            cst::Statement::Selection(sel) => {
                let cond = self.build_condition(&sel.condition);
                let then_body = self.build_body(&sel.then_stmt);
                let else_body = sel.else_stmt.as_ref().map(|stmt| self.build_body(stmt));
                Ok(Some(Stmt::If(If {
                    cond: cond?,
                    then_body,
                    else_body,
                })))
            }
            cst::Statement::Iteration(iter) => {
                let cond = self.build_condition(&iter.condition);
                let body = self.build_body(&iter.body);
                Ok(Some(Stmt::While(While { cond: cond?, body })))
            }
            cst::Statement::Compound(items) => Ok(Some(Stmt::Block(self.build_items(items)))),
        }
    }

    /// Bodies are always blocks
    fn build_body(&mut self, stmt: &cst::Statement) -> Block {
        match self.build_statement(stmt) {
            Ok(Some(stmt)) => Block::wrap(stmt),
            Ok(None) => Block::default(),
            Err(e) => {
                self.msgs.push(Msg::error(e));
                Block::default()
            }
        }
    }

    fn build_condition(&mut self, cond: &cst::Condition) -> Result<Condition, Error> {
        match strip_parens(&cond.0) {
            cst::Expr::Binary(op, lhs, rhs) => match op.text.parse::<CmpOp>() {
                Ok(op) => Ok(Condition {
                    op,
                    lhs: self.build_expr(lhs)?,
                    rhs: self.build_expr(rhs)?,
                }),
                Err(_) => Err(Error::ConditionNotComparison(unparse(&cond.0), op.pos)),
            },
            other => Err(Error::ConditionNotComparison(unparse(other), other.pos())),
        }
    }
}

// ----------------------------------------------------------------------------
// Expressions
// ----------------------------------------------------------------------------

impl Builder {
    fn build_expr(&mut self, expr: &cst::Expr) -> Result<Expr, Error> {
        match expr {
            cst::Expr::Binary(op, lhs, rhs) => match op.text.parse::<ArithOp>() {
                Ok(arith) => Ok(Expr::Arith(
                    arith,
                    Box::new(self.build_expr(lhs)?),
                    Box::new(self.build_expr(rhs)?),
                )),
                Err(_) => Err(Error::ComparisonAsValue(op.text.clone(), op.pos)),
            },
            cst::Expr::Atomic(atomic) => self.build_atomic(atomic),
        }
    }

    fn build_atomic(&mut self, atomic: &cst::AtomicExpr) -> Result<Expr, Error> {
        match atomic {
            cst::AtomicExpr::Identifier(ident) => Ok(Expr::Ident(ident.text.clone())),
            cst::AtomicExpr::Number(minus, number) => {
                let text = match minus {
                    Some(_) => format!("-{}", number.text),
                    None => number.text.clone(),
                };
                let pos = minus.as_ref().map_or(number.pos, |m| m.pos);
                Ok(Expr::Number(self.build_number(text, pos)?))
            }
            cst::AtomicExpr::Paren(expr) => self.build_expr(expr),
            cst::AtomicExpr::Funcall(call) => Ok(Expr::Call(self.build_call(call)?)),
        }
    }

    fn build_number(&mut self, text: String, pos: Pos) -> Result<Number, Error> {
        match text.parse::<i64>().ok().and_then(Const::from_value) {
            Some(value) => Ok(Number { text, value }),
            None => {
                self.degrade(
                    Error::LiteralOutOfRange(text.clone(), pos),
                    "compiled as `iconst_0`",
                )?;
                Ok(Number {
                    text,
                    value: Const::C0,
                })
            }
        }
    }

    fn build_call(&mut self, call: &cst::Funcall) -> Result<Call, Error> {
        let name = &call.identifier;
        let args = call
            .argument_expr_list
            .iter()
            .flatten()
            .map(|arg| self.build_expr(arg))
            .collect::<Result<Vec<_>, _>>()?;

        let builtin = match name.text.parse::<Builtin>() {
            Ok(builtin) => builtin,
            Err(_) => {
                self.degrade(
                    Error::UnknownFunction(name.text.clone(), name.pos),
                    "no code is emitted for this call",
                )?;
                return Ok(Call {
                    callee: Callee::Unknown(name.text.clone()),
                    args,
                });
            }
        };

        if args.len() != builtin.arity() {
            let note = match builtin {
                Builtin::PUTINT if args.is_empty() => "no code is emitted for this call",
                Builtin::PUTINT => "only the first argument is printed",
                Builtin::GETINT => "the arguments are ignored",
            };
            let error = Error::ArityMismatch(name.text.clone(), builtin.arity(), args.len(), name.pos);
            self.degrade(error, note)?;
        }

        Ok(Call {
            callee: Callee::Builtin(builtin),
            args,
        })
    }
}

fn strip_parens(expr: &cst::Expr) -> &cst::Expr {
    match expr {
        cst::Expr::Atomic(cst::AtomicExpr::Paren(inner)) => strip_parens(inner),
        other => other,
    }
}

/// Source-like text of an expression, for diagnostics
fn unparse(expr: &cst::Expr) -> String {
    match expr {
        cst::Expr::Binary(op, lhs, rhs) => format!("{} {} {}", unparse(lhs), op.text, unparse(rhs)),
        cst::Expr::Atomic(cst::AtomicExpr::Identifier(ident)) => ident.text.clone(),
        cst::Expr::Atomic(cst::AtomicExpr::Number(minus, number)) => match minus {
            Some(_) => format!("-{}", number.text),
            None => number.text.clone(),
        },
        cst::Expr::Atomic(cst::AtomicExpr::Paren(inner)) => format!("({})", unparse(inner)),
        cst::Expr::Atomic(cst::AtomicExpr::Funcall(call)) => format!(
            "{}({})",
            call.identifier.text,
            call.argument_expr_list.iter().flatten().map(unparse).join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammer;

    fn unparsed(code: &str) -> String {
        let (program, errors) = grammer::parse(code);
        assert!(errors.is_empty());
        match &program.0[0] {
            cst::BlockItem::Statement(cst::Statement::Simple(
                cst::SimpleStatement::Assignment(_, expr),
            )) => unparse(expr),
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn unparse_keeps_source_shape() {
        assert_eq!(unparsed("x = a + (b * -1);"), "a + (b * -1)");
        assert_eq!(unparsed("x = f(1, g());"), "f(1, g())");
    }

    #[test]
    fn degrade_depends_on_mode() {
        let mut strict = Builder::new(false);
        assert!(strict.degrade(Error::UnexpectedEOF, "note").is_err());
        assert!(strict.msgs.is_empty());

        let mut lenient = Builder::new(true);
        assert!(lenient.degrade(Error::UnexpectedEOF, "note").is_ok());
        assert_eq!(lenient.msgs.len(), 1);
        assert!(!lenient.msgs[0].is_error());
        assert_eq!(lenient.msgs[0].note.as_deref(), Some("note"));
    }
}
