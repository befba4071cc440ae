/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks a parsed program, resolves names through the scope
/// stack, applies operators and calls builtin and user-defined functions.
///
/// # Responsibilities
/// - Evaluates expressions and statements, including `while` loops.
/// - Enforces the type rules of every operator and builtin.
/// - Reports runtime errors such as division by zero or unknown names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a literal, identifier, keyword, operator or punctuation
/// mark, with its source position. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Skips whitespace and comments.
/// - Reports unterminated strings and unrecognized characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// a [`Program`](crate::ast::Program) by recursive descent with one function
/// per precedence level.
///
/// # Responsibilities
/// - Converts tokens into expressions and statements.
/// - Validates the grammar, reporting errors with position info.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Operand` enum and its six variants.
/// - Implements VeLa equality and the human-readable rendering.
/// - Describes types and type sets for annotations and builtin signatures.
pub mod value;
/// Scopes and host supplied bindings.
///
/// Defines `Bindings`, the name to operand map hosts build per item, and the
/// `Environment` scope stack the evaluator resolves names through.
pub mod environment;
/// The interpreter façade.
///
/// Ties the lexer, parser and evaluator together behind `Interpreter`, which
/// caches parsed programs and exposes the push/evaluate/pop protocol.
pub mod session;
