use super::token::{Pos, Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    row: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            iter: code.chars().peekable(),
            row: 0,
            col: 0,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.iter.clone().nth(n)
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.iter.next()?;
        if ch == '\n' {
            self.row += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, cond: F, lexeme: &mut String) {
        while let Some(ch) = self.peek_nth(0) {
            if !cond(ch) {
                break;
            }
            self.consume();
            lexeme.push(ch);
        }
    }

    fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }
}

// ----------------------------------------------------------------------------
// Lexer
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    pub fn parse(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(ch0) = self.peek_nth(0) {
            // 0. Skip whitespaces
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            let pos = self.pos();

            // 1. Double character token
            if let Some(ch1) = self.peek_nth(1) {
                // Line comment
                if ch0 == '/' && ch1 == '/' {
                    self.consume(); // consume '/'
                    self.consume(); // consume '/'
                    let mut comment = String::new();
                    self.consume_while(|ch| ch != '\n', &mut comment);
                    let comment = comment.trim().to_string();
                    tokens.push(Token::new(TokenKind::Comment(comment), pos));
                    continue;
                }

                // Block comment
                if ch0 == '/' && ch1 == '*' {
                    tokens.push(Token::new(self.parse_block_comment(), pos));
                    continue;
                }

                if let Some(kind) = double_char_token(ch0, ch1) {
                    self.consume();
                    self.consume();
                    tokens.push(Token::new(kind, pos));
                    continue;
                }
            }

            // 2. Single character token
            if let Some(kind) = single_char_token(ch0) {
                self.consume();
                tokens.push(Token::new(kind, pos));
                continue;
            }

            // 3. Number literal
            if ch0.is_ascii_digit() {
                tokens.push(Token::new(self.parse_number(), pos));
                continue;
            }

            // 4. Identifier or keyword
            if ch0.is_ascii_alphabetic() || ch0 == '_' {
                tokens.push(Token::new(self.parse_string(), pos));
                continue;
            }

            // Error
            self.consume();
            tokens.push(Token::new(TokenKind::Error(format!("{ch0}")), pos));
        }
        tokens
    }

    fn parse_string(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        self.consume_while(|ch| matches!(ch, '_' | '0'..='9' | 'a'..='z' | 'A'..='Z'), &mut lexeme);
        match keyword(&lexeme) {
            Some(kind) => kind,
            None => TokenKind::Ident(lexeme),
        }
    }

    // 12 or 1.5
    fn parse_number(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        self.consume_while(|ch| ch.is_ascii_digit(), &mut lexeme);
        if self.peek_nth(0) == Some('.') && self.peek_nth(1).is_some_and(|ch| ch.is_ascii_digit()) {
            self.consume();
            lexeme.push('.');
            self.consume_while(|ch| ch.is_ascii_digit(), &mut lexeme);
        }
        TokenKind::Number(lexeme)
    }

    // /* ... */
    fn parse_block_comment(&mut self) -> TokenKind {
        self.consume(); // consume '/'
        self.consume(); // consume '*'
        let mut comment = String::new();
        while let Some(ch) = self.consume() {
            if ch == '*' && self.peek_nth(0) == Some('/') {
                self.consume();
                return TokenKind::Comment(comment.trim().to_string());
            }
            comment.push(ch);
        }
        TokenKind::Error(format!("/*"))
    }
}

fn double_char_token(ch0: char, ch1: char) -> Option<TokenKind> {
    match (ch0, ch1) {
        ('=', '=') => Some(TokenKind::EqualEqual),
        ('!', '=') => Some(TokenKind::ExclEqual),
        ('<', '=') => Some(TokenKind::LAngleEqual),
        ('>', '=') => Some(TokenKind::RAngleEqual),
        _ => None,
    }
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        '=' => Some(TokenKind::Equal),
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        '<' => Some(TokenKind::LAngle),
        '>' => Some(TokenKind::RAngle),
        ';' => Some(TokenKind::Semicolon),
        ',' => Some(TokenKind::Comma),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '{' => Some(TokenKind::LCurly),
        '}' => Some(TokenKind::RCurly),
        _ => None,
    }
}

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "int" => Some(TokenKind::KwInt),
        "float" => Some(TokenKind::KwFloat),
        "if" => Some(TokenKind::KwIf),
        "else" => Some(TokenKind::KwElse),
        "while" => Some(TokenKind::KwWhile),
        _ => None,
    }
}
