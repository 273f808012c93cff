use super::cst::*;
use super::parsercore::Parser;
use super::token::{Token, TokenKind, TokenKind::*};
use crate::error::Error;
use crate::msg::Msg;
use crate::{check, expect, optional, recover, repeat};

impl<I: Iterator<Item = Token> + Clone> Parser<I> {
    pub fn parse(mut self) -> (Program, Vec<Msg>) {
        let program = Program(self.parse_block_items(false));
        (program, self.geterrors())
    }
}

impl<I: Iterator<Item = Token> + Clone> Parser<I> {
    /// { block_item } until "}" (nested) or EOF (top level)
    fn parse_block_items(&mut self, nested: bool) -> Vec<BlockItem> {
        let mut items = Vec::new();
        while let Some(token) = self.peek() {
            if token.kind == RCurly {
                if nested {
                    break;
                }
                let e = self.unexpected();
                self.error(e);
                self.next();
                continue;
            }
            match self.parse_block_item() {
                Ok(item) => items.push(item),
                Err(err) => {
                    self.error(err);
                    recover!(self);
                }
            }
        }
        items
    }

    /// block_item = declaration | statement
    fn parse_block_item(&mut self) -> Result<BlockItem, Error> {
        if self.is_declaration() {
            Ok(BlockItem::Declaration(self.parse_declaration()?))
        } else {
            Ok(BlockItem::Statement(self.parse_statement()?))
        }
    }

    /// A declaration starts with a type keyword, or with two identifiers (`char c;`)
    fn is_declaration(&mut self) -> bool {
        let first = self.peek_nth(0).map(|t| t.kind);
        let second = self.peek_nth(1).map(|t| t.kind);
        match (first, second) {
            (Some(KwInt | KwFloat), _) => true,
            (Some(Ident(_)), Some(Ident(_))) => true,
            _ => false,
        }
    }

    /// declaration = type_specifier ident [ "=" expr ] ";"
    fn parse_declaration(&mut self) -> Result<Declaration, Error> {
        let ty = self.expect_tobe(|t| matches!(t.kind, KwInt | KwFloat | Ident(_)))?;
        let type_specifier = Terminal::new(ty.kind.text(), ty.pos);
        let identifier = self.parse_ident()?;
        let init = optional!(self, Equal, self.parse_expr()?);
        expect!(self, Semicolon)?;
        Ok(Declaration {
            type_specifier,
            declarator: Declarator { identifier, init },
        })
    }

    fn parse_ident(&mut self) -> Result<Terminal, Error> {
        let token = expect!(self, Ident(_))?;
        Ok(Terminal::new(token.kind.text(), token.pos))
    }

    /// statement = compound | selection | iteration | simple
    fn parse_statement(&mut self) -> Result<Statement, Error> {
        let kind = match self.peek() {
            Some(token) => token.kind.clone(),
            None => return Err(Error::UnexpectedEOF),
        };
        match kind {
            // Compound statement: "{" { block_item } "}"
            LCurly => {
                expect!(self, LCurly)?;
                let items = self.parse_block_items(true);
                expect!(self, RCurly)?;
                Ok(Statement::Compound(items))
            }

            // Selection statement: "if" "(" condition ")" statement [ "else" statement ]
            KwIf => {
                expect!(self, KwIf)?;
                let condition = self.parse_condition()?;
                let then_stmt = Box::new(self.parse_statement()?);
                let else_stmt = optional!(self, KwElse, Box::new(self.parse_statement()?));
                Ok(Statement::Selection(SelectionStatement {
                    condition,
                    then_stmt,
                    else_stmt,
                }))
            }

            // Iteration statement: "while" "(" condition ")" statement
            KwWhile => {
                expect!(self, KwWhile)?;
                let condition = self.parse_condition()?;
                let body = Box::new(self.parse_statement()?);
                Ok(Statement::Iteration(IterationStatement { condition, body }))
            }

            _ => Ok(Statement::Simple(self.parse_simple_statement()?)),
        }
    }

    /// simple_statement = [ ident "=" expr | funcall ] ";"
    fn parse_simple_statement(&mut self) -> Result<SimpleStatement, Error> {
        if check!(self, Semicolon) {
            expect!(self, Semicolon)?;
            return Ok(SimpleStatement::Empty);
        }
        let stmt = match self.peek_nth(1).map(|t| t.kind) {
            Some(Equal) => {
                let ident = self.parse_ident()?;
                expect!(self, Equal)?;
                let expr = self.parse_expr()?;
                SimpleStatement::Assignment(ident, expr)
            }
            Some(LParen) => SimpleStatement::Funcall(self.parse_funcall()?),
            _ => return Err(self.unexpected()),
        };
        expect!(self, Semicolon)?;
        Ok(stmt)
    }

    /// "(" condition ")"
    fn parse_condition(&mut self) -> Result<Condition, Error> {
        expect!(self, LParen)?;
        let expr = self.parse_expr()?;
        expect!(self, RParen)?;
        Ok(Condition(expr))
    }

    /// funcall = ident "(" [ expr { "," expr } ] ")"
    fn parse_funcall(&mut self) -> Result<Funcall, Error> {
        let identifier = self.parse_ident()?;
        expect!(self, LParen)?;
        let args = repeat!(self, self.parse_expr(), Comma, RParen);
        expect!(self, RParen)?;
        Ok(Funcall {
            identifier,
            argument_expr_list: (!args.is_empty()).then_some(args),
        })
    }

    /// expr = cmp-expr
    fn parse_expr(&mut self) -> Result<Expr, Error> {
        self.parse_cmp_expr()
    }

    /// cmp-expr = add-expr { ( "==" | "!=" | "<" | "<=" | ">" | ">=" ) add-expr }
    fn parse_cmp_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_add_expr()?;
        while let Some(op) = self.parse_binary_op(|kind| {
            matches!(kind, EqualEqual | ExclEqual | LAngle | LAngleEqual | RAngle | RAngleEqual)
        }) {
            let rhs = self.parse_add_expr()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// add-expr = mul-expr { ( "+" | "-" ) mul-expr }
    fn parse_add_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_mul_expr()?;
        while let Some(op) = self.parse_binary_op(|kind| matches!(kind, Plus | Minus)) {
            let rhs = self.parse_mul_expr()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// mul-expr = atomic-expr { ( "*" | "/" ) atomic-expr }
    fn parse_mul_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = Expr::Atomic(self.parse_atomic_expr()?);
        while let Some(op) = self.parse_binary_op(|kind| matches!(kind, Star | Slash)) {
            let rhs = Expr::Atomic(self.parse_atomic_expr()?);
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// Consume the next token if it is one of the operators
    fn parse_binary_op(&mut self, is_op: fn(&TokenKind) -> bool) -> Option<Terminal> {
        let token = self.peek()?.clone();
        if is_op(&token.kind) {
            self.next();
            Some(Terminal::new(token.kind.text(), token.pos))
        } else {
            None
        }
    }

    /// atomic-expr = ident | [ "-" ] number | "(" expr ")" | funcall
    fn parse_atomic_expr(&mut self) -> Result<AtomicExpr, Error> {
        let kind = match self.peek() {
            Some(token) => token.kind.clone(),
            None => return Err(Error::UnexpectedEOF),
        };
        match kind {
            Ident(_) => {
                if matches!(self.peek_nth(1).map(|t| t.kind), Some(LParen)) {
                    Ok(AtomicExpr::Funcall(self.parse_funcall()?))
                } else {
                    Ok(AtomicExpr::Identifier(self.parse_ident()?))
                }
            }
            Minus => {
                let minus = expect!(self, Minus)?;
                let number = expect!(self, Number(_))?;
                Ok(AtomicExpr::Number(
                    Some(Terminal::new(minus.kind.text(), minus.pos)),
                    Terminal::new(number.kind.text(), number.pos),
                ))
            }
            Number(_) => {
                let number = expect!(self, Number(_))?;
                Ok(AtomicExpr::Number(
                    None,
                    Terminal::new(number.kind.text(), number.pos),
                ))
            }
            LParen => {
                expect!(self, LParen)?;
                let expr = self.parse_expr()?;
                expect!(self, RParen)?;
                Ok(AtomicExpr::Paren(Box::new(expr)))
            }
            _ => Err(self.unexpected()),
        }
    }
}
