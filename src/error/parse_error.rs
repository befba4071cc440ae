use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Lexing failures are reported through this type too: a VeLa host only ever
/// distinguishes "the source is malformed" from "the program failed while
/// running".
pub enum ParseError {
    /// Found a token the grammar does not allow at this point.
    UnexpectedToken {
        /// The token encountered.
        found:    String,
        /// What the parser was looking for.
        expected: String,
        /// Where the token starts.
        pos:      Position,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// The end-of-input position.
        pos:      Position,
    },
    /// A string literal had no closing quote.
    UnterminatedString {
        /// Position of the opening quote.
        pos: Position,
    },
    /// A character that starts no token.
    UnrecognizedCharacter {
        /// The offending text.
        text: String,
        /// Where it appears.
        pos:  Position,
    },
    /// An integer literal does not fit in 64 bits.
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
        /// Where it appears.
        pos:     Position,
    },
    /// A type annotation named no known type.
    UnknownType {
        /// The annotation as written.
        name: String,
        /// Where it appears.
        pos:  Position,
    },
}

impl ParseError {
    /// The source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEndOfInput { pos, .. }
            | Self::UnterminatedString { pos }
            | Self::UnrecognizedCharacter { pos, .. }
            | Self::LiteralTooLarge { pos, .. }
            | Self::UnknownType { pos, .. } => *pos,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected, pos } => {
                write!(f, "Error on {pos}: Expected {expected}, found {found}.")
            },
            Self::UnexpectedEndOfInput { expected, pos } => {
                write!(f, "Error on {pos}: Expected {expected}, found end of input.")
            },
            Self::UnterminatedString { pos } => {
                write!(f, "Error on {pos}: Unterminated string literal.")
            },
            Self::UnrecognizedCharacter { text, pos } => {
                write!(f, "Error on {pos}: Unrecognized character '{text}'.")
            },
            Self::LiteralTooLarge { literal, pos } => write!(f,
                                                             "Error on {pos}: Integer literal {literal} is too large."),
            Self::UnknownType { name, pos } => write!(f,
                                                      "Error on {pos}: Unknown type '{name}'. Expected one of integer, real, string, boolean, list, function."),
        }
    }
}

impl std::error::Error for ParseError {}
