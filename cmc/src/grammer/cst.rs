//! Parse tree. One type per grammar rule, holding the raw terminals of the rule.
//! Nothing here is validated yet; see `builder`.

use super::token::Pos;

/// A terminal: the token text and where it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    pub text: String,
    pub pos: Pos,
}

impl Terminal {
    pub fn new(text: impl Into<String>, pos: Pos) -> Self {
        Terminal {
            text: text.into(),
            pos,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Program(pub Vec<BlockItem>); // program = { block_item }

#[derive(Debug, Clone)]
pub enum BlockItem {
    Declaration(Declaration), // declaration
    Statement(Statement),     // statement
}

#[derive(Debug, Clone)]
pub struct Declaration {
    pub type_specifier: Terminal, // ident | "int" | "float"
    pub declarator: Declarator,   // declarator ";"
}

#[derive(Debug, Clone)]
pub struct Declarator {
    pub identifier: Terminal, // ident
    pub init: Option<Expr>,   // [ "=" expr ]
}

#[derive(Debug, Clone)]
pub enum Statement {
    Simple(SimpleStatement),       // simple_statement
    Selection(SelectionStatement), // "if" "(" condition ")" statement [ "else" statement ]
    Iteration(IterationStatement), // "while" "(" condition ")" statement
    Compound(Vec<BlockItem>),      // "{" { block_item } "}"
}

#[derive(Debug, Clone)]
pub enum SimpleStatement {
    Assignment(Terminal, Expr), // ident "=" expr ";"
    Funcall(Funcall),           // funcall ";"
    Empty,                      // ";"
}

#[derive(Debug, Clone)]
pub struct Funcall {
    pub identifier: Terminal,                   // ident
    pub argument_expr_list: Option<Vec<Expr>>, // "(" [ expr { "," expr } ] ")"
}

#[derive(Debug, Clone)]
pub struct SelectionStatement {
    pub condition: Condition,
    pub then_stmt: Box<Statement>,
    pub else_stmt: Option<Box<Statement>>,
}

#[derive(Debug, Clone)]
pub struct IterationStatement {
    pub condition: Condition,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone)]
pub struct Condition(pub Expr); // expr

#[derive(Debug, Clone)]
pub enum Expr {
    Atomic(AtomicExpr),                   // atomic_expr
    Binary(Terminal, Box<Expr>, Box<Expr>), // expr op expr
}

#[derive(Debug, Clone)]
pub enum AtomicExpr {
    Identifier(Terminal),               // ident
    Number(Option<Terminal>, Terminal), // [ "-" ] number
    Paren(Box<Expr>),                   // "(" expr ")"
    Funcall(Funcall),                   // funcall
}

impl Expr {
    /// Position of the first terminal
    pub fn pos(&self) -> Pos {
        match self {
            Expr::Atomic(atomic) => atomic.pos(),
            Expr::Binary(_, lhs, _) => lhs.pos(),
        }
    }
}

impl AtomicExpr {
    pub fn pos(&self) -> Pos {
        match self {
            AtomicExpr::Identifier(t) => t.pos,
            AtomicExpr::Number(Some(minus), _) => minus.pos,
            AtomicExpr::Number(None, number) => number.pos,
            AtomicExpr::Paren(expr) => expr.pos(),
            AtomicExpr::Funcall(call) => call.identifier.pos,
        }
    }
}
