use std::rc::Rc;

use crate::interpreter::value::types::Type;

/// A location in VeLa source text.
///
/// Lines and columns are both 1-based. Columns count characters, not bytes,
/// so positions line up with what an editor shows for non-ASCII input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// The source line.
    pub line:   usize,
    /// The column within the line.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constants that can appear directly in source
/// code. Strings are reference counted so that evaluating a literal many times
/// (once per observation, typically) never copies the text.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A double-quoted string literal, without its quotes.
    String(Rc<str>),
    /// A boolean literal value: `true` or `false`.
    Boolean(bool),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every node owns its children exclusively; the tree has no sharing between
/// nodes and no cycles. The one exception to plain ownership is
/// [`Expr::Function`], whose definition is reference counted so that the
/// runtime function value created from it can outlive a single evaluation
/// without copying the body.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Position in the source code.
        pos:   Position,
    },
    /// Reference to a bound name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Position in the source code.
        pos:  Position,
    },
    /// A unary operation (negation or logical not).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Position in the source code.
        pos:  Position,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Position of the operator.
        pos:   Position,
    },
    /// Function call expression (e.g. `abs(x)`).
    FunctionCall {
        /// Name the callee is resolved through.
        name:      String,
        /// Arguments to the function, evaluated left to right.
        arguments: Vec<Self>,
        /// Position in the source code.
        pos:       Position,
    },
    /// Conditional expression.
    Conditional {
        /// The condition; must evaluate to a boolean.
        condition:   Box<Self>,
        /// Evaluated if the condition is true.
        then_branch: Box<Self>,
        /// Evaluated if the condition is false.
        else_branch: Option<Box<Self>>,
        /// Position of the `if` keyword.
        pos:         Position,
    },
    /// A braced sequence of statements.
    Block {
        /// Statements inside the block.
        statements: Vec<Statement>,
        /// Position of the opening brace.
        pos:        Position,
    },
    /// List literal expression (`{a, b, c}`).
    ListLiteral {
        /// Elements of the list.
        elements: Vec<Self>,
        /// Position of the opening brace.
        pos:      Position,
    },
    /// A function definition used as a value (anonymous `fun`).
    Function {
        /// The definition.
        def: Rc<FunctionDef>,
        /// Position of the `fun` keyword.
        pos: Position,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    ///
    /// ## Example
    /// ```
    /// use vela::ast::{Expr, Position};
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             pos:  Position::new(5, 3), };
    ///
    /// assert_eq!(expr.position().line, 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { pos, .. }
            | Self::Variable { pos, .. }
            | Self::UnaryOp { pos, .. }
            | Self::BinaryOp { pos, .. }
            | Self::FunctionCall { pos, .. }
            | Self::Conditional { pos, .. }
            | Self::Block { pos, .. }
            | Self::ListLiteral { pos, .. }
            | Self::Function { pos, .. } => *pos,
        }
    }
}

/// A formal parameter of a user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The parameter name.
    pub name: String,
    /// The declared type, if annotated.
    pub ty:   Option<Type>,
}

/// Represents a user-defined function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function; `None` for anonymous functions.
    pub name:        Option<String>,
    /// The formal parameters.
    pub params:      Vec<Param>,
    /// The declared return type, if annotated.
    pub return_type: Option<Type>,
    /// The body evaluated when the function is called.
    pub body:        Expr,
    /// Position in the source code.
    pub pos:         Position,
}

impl FunctionDef {
    /// The number of parameters this function takes.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Represents a statement.
///
/// Statements are the units separated by `;` at the top level of a program
/// and inside blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
    },
    /// A binding created with `let` or `const`.
    Binding {
        /// The name being bound.
        name:     String,
        /// The bound value.
        value:    Expr,
        /// Whether the binding may be rebound later in the same scope.
        constant: bool,
        /// Position in the source code.
        pos:      Position,
    },
    /// A named function definition (`fun name(...) { ... }`).
    Function(Rc<FunctionDef>),
    /// A `while` loop.
    While {
        /// The loop condition; must evaluate to a boolean.
        condition: Expr,
        /// The loop body.
        body:      Expr,
        /// Position of the `while` keyword.
        pos:       Position,
    },
}

impl Statement {
    /// Gets the source position of the statement.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Expression { expr } => expr.position(),
            Self::Binding { pos, .. } | Self::While { pos, .. } => *pos,
            Self::Function(def) => def.pos,
        }
    }
}

/// The parsed, immutable form of one VeLa source text.
///
/// A `Program` carries no mutable state, so it can be evaluated any number of
/// times against different environments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The top-level statements, in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Returns `true` for a program with no statements (empty source, or only
    /// whitespace and comments).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Exponentiation (`^`), right associative
    Pow,
    /// Equal to (`=`)
    Equal,
    /// Not equal to (`<>`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Membership or substring containment (`in`)
    In,
    /// Whole-string regular expression match (`=~`)
    Matches,
    /// Short-circuit logical and (`&`)
    And,
    /// Short-circuit logical or (`|`)
    Or,
    /// Implication (`=>`), evaluated as `!p | q`
    Implies,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Implies, In, Less, LessEqual, Matches, Mod,
            Mul, NotEqual, Or, Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "^",
            Equal => "=",
            NotEqual => "<>",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            In => "in",
            Matches => "=~",
            And => "&",
            Or => "|",
            Implies => "=>",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}
