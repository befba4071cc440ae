use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDef, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_power, parse_relational},
            block::parse_block,
            core::{ParseResult, parse_expression, parse_if},
            utils::{TokenCursor, parse_comma_separated, parse_params, parse_type_annotation},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses logical negation.
///
/// `!` sits between `&` and the comparisons, so `!a = b` negates the whole
/// comparison.
///
/// Grammar: `not := "!" not | relational`
///
/// # Parameters
/// - `tokens`: Token cursor.
///
/// # Returns
/// An `Expr::UnaryOp` node or the relational expression.
pub fn parse_not(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    ensure_sufficient_stack(|| {
        let pos = tokens.peek_pos();
        if tokens.eat(&Token::Bang) {
            let expr = parse_not(tokens)?;
            return Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                                      expr: Box::new(expr),
                                      pos });
        }
        parse_relational(tokens)
    })
}

/// Parses unary minus.
///
/// Grammar: `unary := "-" unary | power`
///
/// # Parameters
/// - `tokens`: Token cursor.
///
/// # Returns
/// An `Expr::UnaryOp` node or the power expression.
pub fn parse_unary(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    ensure_sufficient_stack(|| {
        let pos = tokens.peek_pos();
        if tokens.eat(&Token::Minus) {
            let expr = parse_unary(tokens)?;
            return Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                                      expr: Box::new(expr),
                                      pos });
        }
        parse_power(tokens)
    })
}

/// Parses a primary expression.
///
/// Primary expressions are the atoms of the grammar:
/// - literals (integer, real, string, boolean),
/// - variable references and function calls,
/// - parenthesized expressions,
/// - list literals `{a, b, c}`,
/// - `if` expressions,
/// - anonymous functions `fun (x) { ... }`.
///
/// # Parameters
/// - `tokens`: Token cursor.
///
/// # Returns
/// The parsed expression.
///
/// # Errors
/// - `UnexpectedToken` if the token cannot start an expression.
/// - `UnexpectedEndOfInput` if the input ends where an expression is needed.
pub fn parse_primary(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let Some(lexeme) = tokens.peek() else {
        return Err(tokens.error("expression"));
    };
    let pos = lexeme.pos;

    let literal = |value: LiteralValue| Expr::Literal { value, pos };

    match &lexeme.token {
        Token::Integer(n) => {
            tokens.next();
            Ok(literal(LiteralValue::Integer(*n)))
        },
        Token::Real(r) => {
            tokens.next();
            Ok(literal(LiteralValue::Real(*r)))
        },
        Token::Str(s) => {
            tokens.next();
            Ok(literal(LiteralValue::String(Rc::clone(s))))
        },
        Token::Bool(b) => {
            tokens.next();
            Ok(literal(LiteralValue::Boolean(*b)))
        },
        Token::Identifier(name) => {
            tokens.next();
            if tokens.eat(&Token::LParen) {
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                return Ok(Expr::FunctionCall { name: name.clone(),
                                               arguments,
                                               pos });
            }
            Ok(Expr::Variable { name: name.clone(),
                                pos })
        },
        Token::LParen => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            tokens.expect(&Token::RParen, "')'")?;
            Ok(expr)
        },
        Token::LBrace => parse_list_literal(tokens),
        Token::If => parse_if(tokens),
        Token::Fun => parse_function_literal(tokens),
        _ => Err(tokens.error("expression")),
    }
}

/// Parses a list literal of the form `{ expr1, expr2, ..., exprN }`.
///
/// Elements are parsed using [`parse_expression`] and collected into an
/// `Expr::ListLiteral` node. An empty list `{}` is accepted.
///
/// Grammar: `list := "{" [expression ("," expression)*] "}"`
///
/// # Parameters
/// - `tokens`: Token cursor positioned at `{`.
///
/// # Returns
/// An `Expr::ListLiteral` with its element expressions.
pub fn parse_list_literal(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let pos = tokens.expect(&Token::LBrace, "'{'")?.pos;
    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBrace)?;

    Ok(Expr::ListLiteral { elements, pos })
}

/// Parses an anonymous function.
///
/// Grammar: `function := "fun" params [":" type] block`
///
/// # Parameters
/// - `tokens`: Token cursor positioned at `fun`.
///
/// # Returns
/// An `Expr::Function` whose definition has no name.
pub fn parse_function_literal(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let pos = tokens.expect(&Token::Fun, "'fun'")?.pos;
    let params = parse_params(tokens)?;
    let return_type = parse_type_annotation(tokens)?;
    let body = parse_block(tokens)?;

    let def = FunctionDef { name: None,
                            params,
                            return_type,
                            body,
                            pos };
    Ok(Expr::Function { def: Rc::new(def),
                        pos })
}
