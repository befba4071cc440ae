/// Parser entry points.
///
/// Parses complete programs and full expressions, including implication and
/// `if` expressions. Defines `ParseResult`.
pub mod core;

/// Unary and primary expression parsing.
///
/// Handles logical NOT, unary minus, literals, variables, function calls,
/// parentheses, list literals and anonymous functions.
pub mod unary;

/// Binary operator parsing.
///
/// Implements precedence climbing for the logical, relational and arithmetic
/// operator levels.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement sequences used by function bodies, loops
/// and block-form conditionals.
pub mod block;

/// Parser utilities.
///
/// The token cursor, comma-separated lists, identifiers, parameter lists and
/// type annotations.
pub mod utils;

/// Statement parsing.
///
/// Parses bindings, function definitions, loops and expression statements.
pub mod statement;
