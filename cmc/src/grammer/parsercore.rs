use super::token::{Token, TokenKind};
use crate::error::Error;
use crate::msg::Msg;
use std::iter::Peekable;

pub struct Parser<I: Iterator<Item = Token> + Clone> {
    tokens: Peekable<I>,
    errors: Vec<Msg>,
}

impl<I: Iterator<Item = Token> + Clone> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens: tokens.peekable(),
            errors: Vec::new(),
        }
    }

    pub fn error(&mut self, e: Error) {
        self.errors.push(Msg::error(e));
    }

    pub fn geterrors(self) -> Vec<Msg> {
        self.errors
    }
}

impl<I: Iterator<Item = Token> + Clone> Parser<I> {
    /// Skip comments, reporting invalid tokens on the way
    fn skip(&mut self) {
        while let Some(token) = self.tokens.peek() {
            match &token.kind {
                TokenKind::Comment(_) => {}
                TokenKind::Error(s) => {
                    let e = Error::InvalidCharacter(s.clone(), token.pos);
                    self.errors.push(Msg::error(e));
                }
                _ => break,
            };
            self.tokens.next();
        }
    }

    /// Peek : Watch next token without consuming it
    pub fn peek(&mut self) -> Option<&Token> {
        self.skip();
        self.tokens.peek()
    }

    /// Peek n tokens ahead (0 is the next one), ignoring comments and invalid tokens
    pub fn peek_nth(&mut self, n: usize) -> Option<Token> {
        self.skip();
        self.tokens
            .clone()
            .filter(|token| !matches!(token.kind, TokenKind::Comment(_) | TokenKind::Error(_)))
            .nth(n)
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Option<Token> {
        self.skip();
        self.tokens.next()
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        self.skip();
        self.tokens.peek().is_some_and(|token| cond(token))
    }

    /// Consume until next token is match with condition
    pub fn consume_until<F: Fn(&Token) -> bool>(&mut self, cond: F) {
        while let Some(tok) = self.tokens.peek() {
            if cond(tok) {
                return;
            }
            self.tokens.next();
        }
    }

    /// Next token must be match with condition (skipping comments)
    pub fn expect_tobe<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Result<Token, Error> {
        self.skip();
        match self.tokens.peek().cloned() {
            Some(token) if cond(&token) => {
                self.next();
                Ok(token)
            }
            Some(token) => Err(Error::UnexpectedToken(token.kind.text(), token.pos)),
            None => Err(Error::UnexpectedEOF),
        }
    }

    /// Error for the next token, or end of file
    pub fn unexpected(&mut self) -> Error {
        match self.peek() {
            Some(token) => Error::UnexpectedToken(token.kind.text(), token.pos),
            None => Error::UnexpectedEOF,
        }
    }
}

#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! expect {
    ($parser:expr, $kind:pat) => {
        $parser.expect_tobe(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! optional {
    ($parser:expr, $trigger:pat, $following:expr) => {
        if check!($parser, $trigger) {
            expect!($parser, $trigger)?;
            Some($following)
        } else {
            None
        }
    };
}

/// Parse repeated elements with optional delimiters
/// 3 args: { element } terminal (no delimiter)
/// 4 args: [ element { delimiter element } ] terminal (with delimiter)
#[macro_export]
macro_rules! repeat {
    // Without delimiter: { element } terminal
    ($parser:expr, $elem:expr, $terminal:pat) => {{
        let mut items = Vec::new();
        while !check!($parser, $terminal) && $parser.peek().is_some() {
            items.push($elem?);
        }
        items
    }};

    // With delimiter: [ element { delimiter element } ] terminal
    ($parser:expr, $elem:expr, $delimiter:pat, $terminal:pat) => {{
        let mut items = Vec::new();
        if !check!($parser, $terminal) {
            items.push($elem?);
            while check!($parser, $delimiter) {
                expect!($parser, $delimiter)?;
                items.push($elem?);
            }
        }
        items
    }};
}

/// Skip to the end of the broken statement.
/// A `;` is consumed, a `}` is left for the enclosing block.
#[macro_export]
macro_rules! recover {
    ($parser:expr) => {{
        use $crate::grammer::token::TokenKind;
        $parser.consume_until(|token| matches!(&token.kind, TokenKind::Semicolon | TokenKind::RCurly));
        if $parser.check_if(|token| token.kind == TokenKind::Semicolon) {
            $parser.next();
        }
    }};
}
