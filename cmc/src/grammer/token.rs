use std::fmt;

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Pos) -> Self {
        Token { kind, pos }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Double character tokens
    EqualEqual,  // '=='
    ExclEqual,   // '!='
    LAngleEqual, // '<='
    RAngleEqual, // '>='

    // Single character tokens
    Equal,     // '='
    Plus,      // '+'
    Minus,     // '-'
    Star,      // '*'
    Slash,     // '/'
    LAngle,    // '<'
    RAngle,    // '>'
    Semicolon, // ';'
    Comma,     // ','
    LParen,    // '('
    RParen,    // ')'
    LCurly,    // '{'
    RCurly,    // '}'

    // Keywords
    KwInt,   // "int"
    KwFloat, // "float"
    KwIf,    // "if"
    KwElse,  // "else"
    KwWhile, // "while"

    // Identifier
    Ident(String),

    // Literal (kept as written, e.g. "5" or "1.5")
    Number(String),

    // Special
    Comment(String), // Comment
    Error(String),   // Error
}

impl TokenKind {
    /// Source text of the token
    pub fn text(&self) -> String {
        use TokenKind::*;
        match self {
            EqualEqual => format!("=="),
            ExclEqual => format!("!="),
            LAngleEqual => format!("<="),
            RAngleEqual => format!(">="),
            Equal => format!("="),
            Plus => format!("+"),
            Minus => format!("-"),
            Star => format!("*"),
            Slash => format!("/"),
            LAngle => format!("<"),
            RAngle => format!(">"),
            Semicolon => format!(";"),
            Comma => format!(","),
            LParen => format!("("),
            RParen => format!(")"),
            LCurly => format!("{{"),
            RCurly => format!("}}"),
            KwInt => format!("int"),
            KwFloat => format!("float"),
            KwIf => format!("if"),
            KwElse => format!("else"),
            KwWhile => format!("while"),
            Ident(s) | Number(s) | Error(s) => s.clone(),
            Comment(s) => format!("//{}", s),
        }
    }
}

/// Zero-based position in the source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}
