use std::rc::Rc;

use logos::Logos;

use crate::{ast::Position, error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Real literal tokens, such as `3.14`, `.5`, `4E2` or `2.25e-2`.
    ///
    /// The exponent takes an optional `-` but never a `+`: `2.25e+2` lexes
    /// as `2.25` followed by the identifier `e`.
    #[regex(r"[0-9]+\.[0-9]+", parse_real)]
    #[regex(r"\.[0-9]+", parse_real)]
    #[regex(r"[0-9]+[eE]-?[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Double-quoted string literal, without its quotes. There are no escape
    /// sequences; the literal ends at the next `"`.
    #[regex(r#""[^"]*""#, parse_string)]
    Str(Rc<str>),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `while`
    #[token("while")]
    While,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// `in`
    #[token("in")]
    In,
    /// Identifier tokens; variable or function names such as `magnitude` or
    /// `str`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `=`
    #[token("=")]
    Equals,
    /// `<>`
    #[token("<>")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `!`
    #[token("!")]
    Bang,
    /// `=>`
    #[token("=>")]
    Implies,
    /// `=~`
    #[token("=~")]
    Matches,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        let start = lex.span().start;
        for (offset, byte) in lex.slice().bytes().enumerate() {
            if byte == b'\n' {
                lex.extras.line += 1;
                lex.extras.line_start = start + offset + 1;
            }
        }
        logos::Skip
    })]
    MultiLineComment,
    /// Newlines separate nothing in VeLa; they only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(r) => write!(f, "real literal {r}"),
            Self::Integer(n) => write!(f, "integer literal {n}"),
            Self::Str(s) => write!(f, "string literal \"{s}\""),
            Self::Bool(b) => write!(f, "'{b}'"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            other => write!(f, "'{}'", other.symbol()),
        }
    }
}

impl Token {
    /// The fixed spelling of keywords, operators and punctuation.
    const fn symbol(&self) -> &'static str {
        match self {
            Self::Let => "let",
            Self::Const => "const",
            Self::Fun => "fun",
            Self::While => "while",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::In => "in",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Equals => "=",
            Self::NotEqual => "<>",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Bang => "!",
            Self::Implies => "=>",
            Self::Matches => "=~",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Real(_)
            | Self::Integer(_)
            | Self::Str(_)
            | Self::Bool(_)
            | Self::Identifier(_)
            | Self::Comment
            | Self::MultiLineComment
            | Self::NewLine
            | Self::Ignored => "",
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset at which it starts, so
/// that every token can be given a line and column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// The category of a token, as seen by hosts and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An integer literal.
    IntegerLiteral,
    /// A real literal.
    RealLiteral,
    /// A string literal.
    StringLiteral,
    /// `true` or `false`.
    BooleanLiteral,
    /// A name.
    Identifier,
    /// An arithmetic, comparison or logical operator, including `in`.
    Operator,
    /// A reserved word other than `in`, `true` and `false`.
    Keyword,
    /// Parentheses, braces, commas, semicolons and colons.
    Punctuation,
    /// The end of the source text.
    EndOfInput,
}

/// A token together with its source text and starting position.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token.
    pub token: Token,
    /// The exact source text of the token.
    pub text:  String,
    /// Where the token starts.
    pub pos:   Position,
}

impl Lexeme {
    /// Classifies this lexeme's token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self.token {
            Token::Integer(_) => TokenKind::IntegerLiteral,
            Token::Real(_) => TokenKind::RealLiteral,
            Token::Str(_) => TokenKind::StringLiteral,
            Token::Bool(_) => TokenKind::BooleanLiteral,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Let
            | Token::Const
            | Token::Fun
            | Token::While
            | Token::If
            | Token::Then
            | Token::Else => TokenKind::Keyword,
            Token::LParen
            | Token::RParen
            | Token::LBrace
            | Token::RBrace
            | Token::Comma
            | Token::Semicolon
            | Token::Colon => TokenKind::Punctuation,
            _ => TokenKind::Operator,
        }
    }
}

/// The complete, finite token sequence of one source text.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    /// The tokens in source order.
    pub lexemes: Vec<Lexeme>,
    /// The position just past the last character of the source.
    pub end:     Position,
}

impl TokenStream {
    /// The token kinds in order, terminated by [`TokenKind::EndOfInput`].
    ///
    /// ## Example
    /// ```
    /// use vela::interpreter::lexer::{TokenKind, tokenize};
    ///
    /// let kinds = tokenize("abs(-2.5)").unwrap().kinds().collect::<Vec<_>>();
    ///
    /// assert_eq!(kinds,
    ///            vec![TokenKind::Identifier,
    ///                 TokenKind::Punctuation,
    ///                 TokenKind::Operator,
    ///                 TokenKind::RealLiteral,
    ///                 TokenKind::Punctuation,
    ///                 TokenKind::EndOfInput]);
    /// ```
    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.lexemes
            .iter()
            .map(Lexeme::kind)
            .chain(std::iter::once(TokenKind::EndOfInput))
    }
}

/// Splits source text into tokens.
///
/// Whitespace, newlines and comments are dropped. Each token records the line
/// and (character based) column at which it starts.
///
/// # Parameters
/// - `source`: The complete VeLa source text.
///
/// # Returns
/// The token stream, or the first lexical error.
///
/// # Errors
/// - `UnterminatedString` at the opening quote of a string with no closing
///   quote.
/// - `LiteralTooLarge` for an integer literal outside the `i64` range.
/// - `UnrecognizedCharacter` for anything else that starts no token.
///
/// ## Example
/// ```
/// use vela::{ast::Position, error::ParseError, interpreter::lexer::tokenize};
///
/// let err = tokenize("x = \"abc").unwrap_err();
/// assert_eq!(err, ParseError::UnterminatedString { pos: Position::new(1, 5) });
/// ```
pub fn tokenize(source: &str) -> ParseResult<TokenStream> {
    let mut lexemes = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let pos = position_of(source, span.start, &lexer.extras);
        let text = lexer.slice();

        match result {
            Ok(token) => {
                if let Token::Str(_) = token {
                    track_newlines(&mut lexer.extras, text, span.start);
                }
                lexemes.push(Lexeme { token,
                                      text: text.to_string(),
                                      pos });
            },
            Err(()) => return Err(classify_error(text, pos)),
        }
    }

    let end = position_of(source, source.len(), &lexer.extras);
    Ok(TokenStream { lexemes, end })
}

/// Computes the 1-based line and character column of byte offset `offset`.
fn position_of(source: &str, offset: usize, extras: &LexerExtras) -> Position {
    let column = source.get(extras.line_start..offset)
                       .map_or(0, |prefix| prefix.chars().count());
    Position::new(extras.line, column + 1)
}

/// Advances the line counters past any newlines inside a multi-line token.
fn track_newlines(extras: &mut LexerExtras, text: &str, start: usize) {
    for (offset, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            extras.line += 1;
            extras.line_start = start + offset + 1;
        }
    }
}

/// Turns a slice the lexer could not match into the matching parse error.
fn classify_error(text: &str, pos: Position) -> ParseError {
    if text.starts_with('"') {
        ParseError::UnterminatedString { pos }
    } else if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        ParseError::LiteralTooLarge { literal: text.to_string(),
                                      pos }
    } else {
        ParseError::UnrecognizedCharacter { text: text.to_string(),
                                            pos }
    }
}

/// Parses a real literal from the current token slice, first extending the
/// token over a directly following exponent.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_real(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    let exponent = exponent_len(lex.remainder());
    lex.bump(exponent);
    lex.slice().parse().ok()
}
/// Byte length of an exponent (`e` or `E`, an optional `-`, then digits) at
/// the start of `rest`, or 0 when there is none.
fn exponent_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(bytes.get(1) == Some(&b'-'));
    let digits = bytes.iter()
                      .skip(1 + sign)
                      .take_while(|b| b.is_ascii_digit())
                      .count();
    if digits == 0 { 0 } else { 1 + sign + digits }
}
/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the literal does not fit in an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Strips the quotes from a string literal.
fn parse_string(lex: &logos::Lexer<Token>) -> Rc<str> {
    let slice = lex.slice();
    Rc::from(&slice[1..slice.len() - 1])
}
/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
