pub mod cst;
pub mod lexer;
pub mod parser;
pub mod parsercore;
pub mod token;

use crate::msg::Msg;

/// Lex and parse a whole source file
pub fn parse(code: &str) -> (cst::Program, Vec<Msg>) {
    let tokens = lexer::Lexer::new(code).parse();
    parsercore::Parser::new(tokens.into_iter()).parse()
}
