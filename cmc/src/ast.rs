//! Validated syntax tree. Built once by `builder`, read by `emit` and `render`.

use arch::alu::{Alu, Cmp};
use arch::inst::{Builtin, Const};
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block(pub Vec<Item>); // "{" { item } "}" or the whole program

#[derive(Debug, Clone, PartialEq)]
pub struct Item(pub Stmt); // declaration | statement

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Type {
    Int,   // "int"
    Float, // "float"
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub ident: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub ident: String,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    Builtin(Builtin),
    Unknown(String), // kept only in lenient mode
}

impl Callee {
    pub fn name(&self) -> String {
        match self {
            Callee::Builtin(builtin) => builtin.to_string(),
            Callee::Unknown(name) => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Callee,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub cond: Condition,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub cond: Condition,
    pub then_body: Block,
    pub else_body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Decl(Decl),             // type ident ";"
    DeclInit(Decl, Assign), // type ident "=" expr ";"
    Assign(Assign),         // ident "=" expr ";"
    Call(Call),             // ident "(" args ")" ";"
    While(While),           // "while" "(" cond ")" body
    If(If),                 // "if" "(" cond ")" body [ "else" body ]
    Block(Block),           // "{" { item } "}"
}

/// Comparison-only wrapper: the one place a comparison may appear.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub op: CmpOp,
    pub lhs: Expr,
    pub rhs: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Arith(ArithOp, Box<Expr>, Box<Expr>),
    Ident(String),
    Number(Number),
    Call(Call),
}

/// A literal as written, with the constant it pushes.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub text: String,
    pub value: Const,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum ArithOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
pub enum CmpOp {
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Ge,
}

impl From<ArithOp> for Alu {
    fn from(op: ArithOp) -> Self {
        match op {
            ArithOp::Add => Alu::ADD,
            ArithOp::Sub => Alu::SUB,
            ArithOp::Mul => Alu::MUL,
            ArithOp::Div => Alu::DIV,
        }
    }
}

impl From<CmpOp> for Cmp {
    fn from(op: CmpOp) -> Self {
        match op {
            CmpOp::Eq => Cmp::EQ,
            CmpOp::Ne => Cmp::NE,
            CmpOp::Lt => Cmp::LT,
            CmpOp::Le => Cmp::LE,
            CmpOp::Gt => Cmp::GT,
            CmpOp::Ge => Cmp::GE,
        }
    }
}

impl Block {
    /// Wrap a statement as a body: blocks stay as they are, anything else becomes a one-item block.
    pub fn wrap(stmt: Stmt) -> Self {
        match stmt {
            Stmt::Block(block) => block,
            other => Block(vec![Item(other)]),
        }
    }
}
