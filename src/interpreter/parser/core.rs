use crate::{
    ast::{BinaryOperator, Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenStream},
        parser::{
            binary::parse_or,
            block::parse_block,
            statement::parse_statement,
            utils::TokenCursor,
        },
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program.
///
/// A program is a sequence of statements separated by semicolons, with an
/// optional trailing semicolon. Every token must be consumed; anything left
/// over after a complete statement is reported as an unexpected token.
///
/// Grammar: `program := [statement (";" statement)* [";"]] END_OF_INPUT`
///
/// # Parameters
/// - `stream`: The tokens of one source text.
///
/// # Returns
/// The parsed program.
///
/// ## Example
/// ```
/// use vela::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("let x = 2; x * 3").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_program(stream: &TokenStream) -> ParseResult<Program> {
    let mut tokens = TokenCursor::new(stream);
    let mut statements = Vec::new();

    loop {
        while tokens.eat(&Token::Semicolon) {}
        if tokens.is_at_end() {
            break;
        }

        statements.push(parse_statement(&mut tokens)?);

        if tokens.eat(&Token::Semicolon) {
            continue;
        }
        if !tokens.is_at_end() {
            return Err(tokens.error("';' or end of input"));
        }
    }

    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, implication, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := implication`
///
/// # Parameters
/// - `tokens`: Cursor positioned at the first token of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    ensure_sufficient_stack(|| parse_implication(tokens))
}

/// Parses an implication.
///
/// `=>` binds more loosely than every other operator and associates to the
/// right: `a => b => c` parses as `a => (b => c)`.
///
/// Grammar: `implication := or ["=>" implication]`
pub fn parse_implication(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let left = parse_or(tokens)?;

    let pos = tokens.peek_pos();
    if tokens.eat(&Token::Implies) {
        let right = parse_expression(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(left),
                                   op: BinaryOperator::Implies,
                                   right: Box::new(right),
                                   pos });
    }

    Ok(left)
}

/// Parses an `if` expression.
///
/// Two forms exist. The expression form selects between two expressions:
/// ```text
///     if <condition> then <expr> [else <expr>]
/// ```
/// The block form selects between blocks and may chain further `if`s:
/// ```text
///     if <condition> { ... } [else { ... } | else if ...]
/// ```
/// Without an `else`, a false condition yields no value.
///
/// # Parameters
/// - `tokens`: Cursor positioned at the `if` keyword.
///
/// # Returns
/// An `Expr::Conditional` node representing the full conditional expression.
///
/// # Errors
/// - `UnexpectedToken` if neither `then` nor `{` follows the condition, or if
///   `else` in the block form is followed by neither `{` nor `if`.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let pos = tokens.expect(&Token::If, "'if'")?.pos;
    let condition = parse_expression(tokens)?;

    let (then_branch, else_branch) = if tokens.eat(&Token::Then) {
        let then_branch = parse_expression(tokens)?;
        let else_branch = if tokens.eat(&Token::Else) {
            Some(Box::new(parse_expression(tokens)?))
        } else {
            None
        };
        (then_branch, else_branch)
    } else if tokens.check(&Token::LBrace) {
        let then_branch = parse_block(tokens)?;
        let else_branch = if tokens.eat(&Token::Else) {
            match tokens.peek_token() {
                Some(Token::If) => Some(Box::new(parse_if(tokens)?)),
                Some(Token::LBrace) => Some(Box::new(parse_block(tokens)?)),
                _ => return Err(tokens.error("'{' or 'if' after 'else'")),
            }
        } else {
            None
        };
        (then_branch, else_branch)
    } else {
        return Err(tokens.error("'then' or '{' after if condition"));
    };

    Ok(Expr::Conditional { condition: Box::new(condition),
                           then_branch: Box::new(then_branch),
                           else_branch,
                           pos })
}
