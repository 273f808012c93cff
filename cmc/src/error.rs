use crate::grammer::token::Pos;
use thiserror::Error;

// Unified error type for the compiler.
// Source positions are carried in the variants but printed by `Msg`, not here.
#[derive(Debug, Error)]
pub enum Error {
    // IO / config errors
    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Invalid config: {0}: {1}")]
    Config(String, #[source] serde_yaml::Error),

    // Lex / parse errors
    #[error("Invalid character: `{0}`")]
    InvalidCharacter(String, Pos),

    #[error("Unexpected end of file")]
    UnexpectedEOF,

    #[error("Unexpected token: `{0}`")]
    UnexpectedToken(String, Pos),

    // Build errors
    #[error("Condition must be a comparison (==, !=, <, <=, >, >=), found `{0}`")]
    ConditionNotComparison(String, Pos),

    #[error("Comparison `{0}` cannot be used as a value")]
    ComparisonAsValue(String, Pos),

    #[error("Unknown type: `{0}` (expected `int` or `float`)")]
    UnknownType(String, Pos),

    #[error("Literal `{0}` is not an integer in the supported range [-1, 5]")]
    LiteralOutOfRange(String, Pos),

    #[error("Unknown function: `{0}`")]
    UnknownFunction(String, Pos),

    #[error("`{0}` expects {1} argument(s), got {2}")]
    ArityMismatch(String, usize, usize, Pos),
}

impl Error {
    pub fn pos(&self) -> Option<Pos> {
        use Error::*;
        match self {
            InvalidCharacter(_, pos)
            | UnexpectedToken(_, pos)
            | ConditionNotComparison(_, pos)
            | ComparisonAsValue(_, pos)
            | UnknownType(_, pos)
            | LiteralOutOfRange(_, pos)
            | UnknownFunction(_, pos)
            | ArityMismatch(_, _, _, pos) => Some(*pos),
            FileRead(..) | FileWrite(..) | Config(..) | UnexpectedEOF => None,
        }
    }
}
