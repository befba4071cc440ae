/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unexpected tokens, unterminated strings, unknown characters and
/// out-of-range literals. Every variant carries the position of the problem.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the error raised while running a syntactically valid program,
/// classified by [`EvalErrorKind`] and optionally chained through the
/// user-defined function calls that led to it.
pub mod eval_error;

pub use eval_error::{EvalError, EvalErrorKind};
pub use parse_error::ParseError;

/// The error returned by the interpreter's entry points.
///
/// Parse errors and evaluation errors are never conflated: evaluation does
/// not start on a program that failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum VeLaError {
    /// The source text is malformed.
    Parse(ParseError),
    /// The program failed while running.
    Eval(EvalError),
}

impl VeLaError {
    /// Returns the evaluation error kind, if this is an evaluation error.
    #[must_use]
    pub const fn eval_kind(&self) -> Option<EvalErrorKind> {
        match self {
            Self::Eval(e) => Some(e.kind),
            Self::Parse(_) => None,
        }
    }

    /// Returns `true` for parse (and lex) errors.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl From<ParseError> for VeLaError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<EvalError> for VeLaError {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}

impl std::fmt::Display for VeLaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Eval(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for VeLaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Eval(e) => Some(e),
        }
    }
}
