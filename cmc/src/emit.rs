use crate::ast::*;
use crate::label::{Label, LabelAllocator, LabelKind};
use arch::alu::{Alu, Cmp};
use arch::inst::{Builtin, Inst, Line};
use itertools::chain;

/// Emit a whole program with a fresh label counter
pub fn emit(program: &Block) -> Vec<Line> {
    let mut labels = LabelAllocator::new();
    Emitter::new(&mut labels).emit_block(program)
}

/// Lowers a validated tree to instruction lines. Total: never fails.
pub struct Emitter<'l> {
    labels: &'l mut LabelAllocator,
}

impl<'l> Emitter<'l> {
    pub fn new(labels: &'l mut LabelAllocator) -> Self {
        Emitter { labels }
    }

    pub fn emit_block(&mut self, block: &Block) -> Vec<Line> {
        let mut lines = Vec::new();
        for Item(stmt) in &block.0 {
            lines.extend(self.emit_stmt(stmt));
        }
        lines
    }

    pub fn emit_stmt(&mut self, stmt: &Stmt) -> Vec<Line> {
        match stmt {
            Stmt::Decl(_) => vec![],
            Stmt::DeclInit(_, assign) | Stmt::Assign(assign) => self.emit_assign(assign),
            Stmt::Call(call) => self.emit_call(call),
            Stmt::Block(block) => self.emit_block(block),

            // start:
            //   <branch to end unless cond>
            //   <body>
            //   goto start
            // end:
            Stmt::While(While { cond, body }) => {
                let (start, end) = self.labels.pair(LabelKind::WhileStart, LabelKind::WhileEnd);
                chain!(
                    [label(start)],
                    self.emit_branch(cond, end),
                    self.emit_block(body),
                    [Line::from(Inst::GOTO(start.to_string())), label(end)],
                )
                .collect()
            }

            // <branch to skip unless cond>
            // <then>
            // skip:
            Stmt::If(If {
                cond,
                then_body,
                else_body: None,
            }) => {
                let skip = self.labels.single(LabelKind::Skip);
                chain!(
                    self.emit_branch(cond, skip),
                    self.emit_block(then_body),
                    [label(skip)],
                )
                .collect()
            }

            // <branch to else unless cond>
            // <then>
            // goto end
            // else:
            // <else>
            // end:
            Stmt::If(If {
                cond,
                then_body,
                else_body: Some(else_body),
            }) => {
                let (els, end) = self.labels.pair(LabelKind::Else, LabelKind::Endif);
                chain!(
                    self.emit_branch(cond, els),
                    self.emit_block(then_body),
                    [Line::from(Inst::GOTO(end.to_string())), label(els)],
                    self.emit_block(else_body),
                    [label(end)],
                )
                .collect()
            }
        }
    }

    fn emit_assign(&mut self, assign: &Assign) -> Vec<Line> {
        chain!(
            self.emit_expr(&assign.expr),
            [Line::from(Inst::STORE(assign.ident.clone()))],
        )
        .collect()
    }

    /// Operands, then a jump to `target` taken when the comparison does not hold
    pub fn emit_branch(&mut self, cond: &Condition, target: Label) -> Vec<Line> {
        let negated = Cmp::from(cond.op).negate();
        chain!(
            self.emit_expr(&cond.lhs),
            self.emit_expr(&cond.rhs),
            [Line::from(Inst::IF(negated, target.to_string()))],
        )
        .collect()
    }

    pub fn emit_expr(&mut self, expr: &Expr) -> Vec<Line> {
        match expr {
            Expr::Arith(op, lhs, rhs) => chain!(
                self.emit_expr(lhs),
                self.emit_expr(rhs),
                [Line::from(Inst::CALC(Alu::from(*op)))],
            )
            .collect(),
            Expr::Ident(name) => vec![Line::from(Inst::LOAD(name.clone()))],
            Expr::Number(number) => vec![Line::from(Inst::CONST(number.value))],
            Expr::Call(call) => self.emit_call(call),
        }
    }

    /// Calls that survive building in lenient mode degrade here:
    /// `putint` uses its first argument only, unknown callees emit nothing.
    fn emit_call(&mut self, call: &Call) -> Vec<Line> {
        match &call.callee {
            Callee::Builtin(Builtin::PUTINT) => match call.args.first() {
                Some(arg) => chain!(
                    self.emit_expr(arg),
                    [Line::from(Inst::CALL(Builtin::PUTINT))],
                )
                .collect(),
                None => vec![],
            },
            Callee::Builtin(Builtin::GETINT) => vec![Line::from(Inst::CALL(Builtin::GETINT))],
            Callee::Unknown(_) => vec![],
        }
    }
}

fn label(label: Label) -> Line {
    Line::Label(label.to_string())
}
