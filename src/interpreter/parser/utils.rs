use crate::{
    ast::{Param, Position},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token, TokenStream},
        parser::core::ParseResult,
        value::types::Type,
    },
};

/// A forward-only cursor over a token stream with bounded lookahead.
///
/// The grammar is LL(1) at every precedence level except where a statement
/// starting with `fun` must look one token further to tell a named definition
/// from an anonymous function expression.
pub struct TokenCursor<'a> {
    lexemes: &'a [Lexeme],
    index:   usize,
    end:     Position,
}

impl<'a> TokenCursor<'a> {
    /// Creates a cursor positioned at the first token of `stream`.
    #[must_use]
    pub fn new(stream: &'a TokenStream) -> Self {
        Self { lexemes: &stream.lexemes,
               index:   0,
               end:     stream.end, }
    }

    /// Returns the next lexeme without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Lexeme> {
        self.lexemes.get(self.index)
    }

    /// Returns the lexeme `n` positions ahead without consuming anything.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<&'a Lexeme> {
        self.lexemes.get(self.index + n)
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek_token(&self) -> Option<&'a Token> {
        self.peek().map(|lexeme| &lexeme.token)
    }

    /// Position of the next token, or of the end of input.
    #[must_use]
    pub fn peek_pos(&self) -> Position {
        self.peek().map_or(self.end, |lexeme| lexeme.pos)
    }

    /// Returns `true` once every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.lexemes.len()
    }

    /// Returns `true` if the next token is `token`.
    #[must_use]
    pub fn check(&self, token: &Token) -> bool {
        self.peek_token() == Some(token)
    }

    /// Consumes the next token if it is `token`.
    pub fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.index += 1;
            return true;
        }
        false
    }

    /// Consumes `token` or fails naming what was `expected`.
    pub fn expect(&mut self, token: &Token, expected: &str) -> ParseResult<&'a Lexeme> {
        match self.peek() {
            Some(lexeme) if lexeme.token == *token => {
                self.index += 1;
                Ok(lexeme)
            },
            _ => Err(self.error(expected)),
        }
    }

    /// Builds the error for finding something other than `expected` at the
    /// current position.
    #[must_use]
    pub fn error(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(lexeme) => ParseError::UnexpectedToken { found:    lexeme.token.to_string(),
                                                          expected: expected.to_string(),
                                                          pos:      lexeme.pos, },
            None => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                       pos:      self.end, },
        }
    }
}

impl<'a> Iterator for TokenCursor<'a> {
    type Item = &'a Lexeme;

    fn next(&mut self) -> Option<Self::Item> {
        let lexeme = self.lexemes.get(self.index)?;
        self.index += 1;
        Some(lexeme)
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals, function argument lists and
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := [item ("," item)*] closing`
///
/// # Parameters
/// - `tokens`: Cursor positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `}` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    tokens: &mut TokenCursor<'_>,
    parse_item: impl Fn(&mut TokenCursor<'_>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if tokens.eat(closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        if tokens.eat(&Token::Comma) {
            continue;
        }
        if tokens.eat(closing) {
            break;
        }
        return Err(tokens.error(&format!("',' or {closing}")));
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name and position.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: &mut TokenCursor<'_>)
                                                       -> ParseResult<(String, Position)> {
    match tokens.peek() {
        Some(Lexeme { token: Token::Identifier(name),
                      pos,
                      .. }) => {
            tokens.next();
            Ok((name.clone(), *pos))
        },
        _ => Err(tokens.error("identifier")),
    }
}

/// Parses an optional `: type` annotation.
///
/// Grammar: `annotation := [":" type]`
///
/// # Returns
/// `Some(Type)` when an annotation is present, `None` otherwise.
///
/// # Errors
/// `UnknownType` if the annotation names no VeLa type.
pub(in crate::interpreter::parser) fn parse_type_annotation(tokens: &mut TokenCursor<'_>)
                                                            -> ParseResult<Option<Type>> {
    if !tokens.eat(&Token::Colon) {
        return Ok(None);
    }
    let (name, pos) = parse_identifier(tokens)?;
    Type::from_name(&name).map(Some)
                          .ok_or(ParseError::UnknownType { name, pos })
}

/// Parses a parenthesized parameter list, including both parentheses.
///
/// Grammar: `params := "(" [IDENT [":" type] ("," IDENT [":" type])*] ")"`
pub(in crate::interpreter::parser) fn parse_params(tokens: &mut TokenCursor<'_>)
                                                   -> ParseResult<Vec<Param>> {
    tokens.expect(&Token::LParen, "'(' to start the parameter list")?;
    parse_comma_separated(tokens,
                          |tokens| {
                              let (name, _) = parse_identifier(tokens)?;
                              let ty = parse_type_annotation(tokens)?;
                              Ok(Param { name, ty })
                          },
                          &Token::RParen)
}
