use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            unary::{parse_not, parse_primary, parse_unary},
            utils::TokenCursor,
        },
    },
};

/// Parses a left-associative chain of binary operators at one precedence
/// level.
///
/// `accepts` selects the operators that belong to this level; operands are
/// parsed with `parse_operand`, the next tighter level.
fn parse_left_associative(tokens: &mut TokenCursor<'_>,
                          accepts: fn(BinaryOperator) -> bool,
                          parse_operand: fn(&mut TokenCursor<'_>) -> ParseResult<Expr>)
                          -> ParseResult<Expr> {
    let mut left = parse_operand(tokens)?;
    loop {
        if let Some(lexeme) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&lexeme.token)
           && accepts(op)
        {
            tokens.next();
            let right = parse_operand(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    pos: lexeme.pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `or := and ("|" and)*`
///
/// # Parameters
/// - `tokens`: Token cursor.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_or(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, |op| op == BinaryOperator::Or, parse_and)
}

/// Parses logical AND expressions.
///
/// The rule is: `and := not ("&" not)*`
pub fn parse_and(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, |op| op == BinaryOperator::And, parse_not)
}

/// Parses relational, equality and membership operators.
///
/// This parser handles all comparison operators:
/// `=`, `<>`, `<`, `<=`, `>`, `>=`, `in` and the pattern match `=~`. Like the arithmetic levels it
/// associates to the left, so `a < b = true` compares the boolean `a < b` with
/// `true`.
///
/// The rule is: `relational := additive (("=" | "<>" | "<" | "<=" | ">" | ">="
/// | "in" | "=~") additive)*`
///
/// # Parameters
/// - `tokens`: Token cursor.
///
/// # Returns
/// A possibly nested `Expr::BinaryOp` tree.
pub fn parse_relational(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens, is_relational_op, parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           |op| matches!(op, BinaryOperator::Add | BinaryOperator::Sub),
                           parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_left_associative(tokens,
                           |op| {
                               matches!(op,
                                        BinaryOperator::Mul
                                        | BinaryOperator::Div
                                        | BinaryOperator::Mod)
                           },
                           parse_unary)
}

/// Parses exponentiation.
///
/// `^` binds tighter than unary minus and associates to the right, so
/// `-3^4^2` is `-(3^(4^2))`. The exponent may itself be negated: `2^-1`.
///
/// The rule is: `power := primary ["^" unary]`
///
/// # Parameters
/// - `tokens`: Token cursor.
///
/// # Returns
/// An `Expr::BinaryOp` node or the primary expression.
pub fn parse_power(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let base = parse_primary(tokens)?;
    let pos = tokens.peek_pos();
    if !tokens.eat(&Token::Caret) {
        return Ok(base);
    }
    let exponent = parse_unary(tokens)?;
    Ok(Expr::BinaryOp { left: Box::new(base),
                        op: BinaryOperator::Pow,
                        right: Box::new(exponent),
                        pos })
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents a binary operator
/// (arithmetic, comparison, membership or logical). Returns `None` for all
/// other tokens.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token corresponds to a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use vela::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::NotEqual), Some(BinaryOperator::NotEqual));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::Equals => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::In => Some(BinaryOperator::In),
        Token::Matches => Some(BinaryOperator::Matches),
        Token::Ampersand => Some(BinaryOperator::And),
        Token::Pipe => Some(BinaryOperator::Or),
        Token::Implies => Some(BinaryOperator::Implies),
        _ => None,
    }
}

/// Returns `true` for the operators parsed at the relational level.
const fn is_relational_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Equal
             | BinaryOperator::NotEqual
             | BinaryOperator::Less
             | BinaryOperator::LessEqual
             | BinaryOperator::Greater
             | BinaryOperator::GreaterEqual
             | BinaryOperator::In
             | BinaryOperator::Matches)
}
