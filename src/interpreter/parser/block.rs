use crate::{
    ast::Expr,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement, utils::TokenCursor},
    },
};

/// Parses a block expression delimited by braces.
///
/// A block consists of zero or more statements separated by semicolons, with
/// an optional trailing semicolon. Parsing continues until the closing `}`.
///
/// Grammar: `block := "{" [statement (";" statement)* [";"]] "}"`
///
/// The resulting expression is returned as `Expr::Block { statements, pos }`.
///
/// # Parameters
/// - `tokens`: Cursor positioned at the opening brace.
///
/// # Returns
/// A block expression containing all parsed statements.
pub fn parse_block(tokens: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let pos = tokens.expect(&Token::LBrace, "'{' to start a block")?.pos;
    let mut statements = Vec::new();

    loop {
        while tokens.eat(&Token::Semicolon) {}

        if tokens.eat(&Token::RBrace) {
            break;
        }

        statements.push(parse_statement(tokens)?);

        if tokens.eat(&Token::Semicolon) {
            continue;
        }
        if tokens.eat(&Token::RBrace) {
            break;
        }
        return Err(tokens.error("';' or '}'"));
    }

    Ok(Expr::Block { statements, pos })
}
