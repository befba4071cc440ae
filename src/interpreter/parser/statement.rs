use std::rc::Rc;

use crate::{
    ast::{FunctionDef, Statement},
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{TokenCursor, parse_identifier, parse_params, parse_type_annotation},
        },
    },
};

/// Parses a single statement.
///
/// Statement forms:
/// - `let name = expr` binds a variable in the innermost scope,
/// - `const name = expr` binds a constant,
/// - `fun name(params) [: type] { ... }` defines a named function,
/// - `while condition { ... }` loops,
/// - any other expression is an expression statement.
///
/// `fun` followed by `(` is an anonymous function and therefore an
/// expression; this is the one place the parser looks two tokens ahead.
///
/// # Parameters
/// - `tokens`: Token cursor positioned at the start of the statement.
///
/// # Returns
/// The parsed statement.
///
/// # Errors
/// Propagates any error from the statement's parts.
pub fn parse_statement(tokens: &mut TokenCursor<'_>) -> ParseResult<Statement> {
    match tokens.peek_token() {
        Some(Token::Let) => parse_binding(tokens, false),
        Some(Token::Const) => parse_binding(tokens, true),
        Some(Token::While) => parse_while(tokens),
        Some(Token::Fun)
            if matches!(tokens.peek_nth(1).map(|lexeme| &lexeme.token),
                        Some(Token::Identifier(_))) =>
        {
            parse_function_definition(tokens)
        },
        _ => Ok(Statement::Expression { expr: parse_expression(tokens)? }),
    }
}

/// Parses a `let` or `const` binding.
///
/// Grammar: `binding := ("let" | "const") IDENT "=" expression`
///
/// # Parameters
/// - `tokens`: Token cursor positioned at `let` or `const`.
/// - `constant`: Whether the keyword was `const`.
fn parse_binding(tokens: &mut TokenCursor<'_>, constant: bool) -> ParseResult<Statement> {
    let pos = tokens.peek_pos();
    tokens.next();

    let (name, _) = parse_identifier(tokens)?;
    tokens.expect(&Token::Equals, "'=' after the bound name")?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Binding { name,
                            value,
                            constant,
                            pos })
}

/// Parses a named function definition.
///
/// Grammar: `definition := "fun" IDENT params [":" type] block`
///
/// # Parameters
/// - `tokens`: Token cursor positioned at `fun`.
///
/// # Returns
/// A `Statement::Function` holding the shared definition.
fn parse_function_definition(tokens: &mut TokenCursor<'_>) -> ParseResult<Statement> {
    let pos = tokens.expect(&Token::Fun, "'fun'")?.pos;
    let (name, _) = parse_identifier(tokens)?;
    let params = parse_params(tokens)?;
    let return_type = parse_type_annotation(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Statement::Function(Rc::new(FunctionDef { name: Some(name),
                                                 params,
                                                 return_type,
                                                 body,
                                                 pos })))
}

/// Parses a `while` loop.
///
/// Grammar: `while := "while" expression block`
fn parse_while(tokens: &mut TokenCursor<'_>) -> ParseResult<Statement> {
    let pos = tokens.expect(&Token::While, "'while'")?.pos;
    let condition = parse_expression(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Statement::While { condition, body, pos })
}
