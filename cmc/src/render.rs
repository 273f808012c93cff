//! Structural dump of the tree.
//!
//! ```text
//! [
//!   (declare "x" int)
//!   (assign "x" 2)
//!   (while (< "x" 3)
//!     [
//!       (assign "x" (+ "x" 1))
//!     ]
//!   )
//! ]
//! ```

use crate::ast::*;
use std::fmt;

/// Prefix every line with two spaces
fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for item in &self.0 {
            writeln!(f, "{}", indent(&item.to_string()))?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Decl(decl) => write!(f, "{decl}"),
            Stmt::DeclInit(decl, assign) => write!(f, "{decl}\n{assign}"),
            Stmt::Assign(assign) => write!(f, "{assign}"),
            Stmt::Call(call) => write!(f, "{call}"),
            Stmt::While(While { cond, body }) => {
                write!(f, "(while {cond}\n{}\n)", indent(&body.to_string()))
            }
            Stmt::If(If {
                cond,
                then_body,
                else_body,
            }) => {
                write!(f, "(if {cond}\n{}\n", indent(&then_body.to_string()))?;
                if let Some(else_body) = else_body {
                    writeln!(f, "{}", indent(&else_body.to_string()))?;
                }
                write!(f, ")")
            }
            Stmt::Block(block) => write!(f, "{block}"),
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(declare \"{}\" {})", self.ident, self.ty)
    }
}

impl fmt::Display for Assign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(assign \"{}\" {})", self.ident, self.expr)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.callee.name())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.op, self.lhs, self.rhs)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Arith(op, lhs, rhs) => write!(f, "({op} {lhs} {rhs})"),
            Expr::Ident(name) => write!(f, "\"{name}\""),
            Expr::Number(number) => write!(f, "{}", number.text),
            Expr::Call(call) => write!(f, "{call}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_every_line() {
        assert_eq!(indent("a\nb"), "  a\n  b");
        assert_eq!(indent(""), "  ");
    }

    #[test]
    fn empty_block() {
        assert_eq!(Block::default().to_string(), "[\n]");
    }
}
