use crate::ast::Position;

/// Classifies an [`EvalError`].
///
/// Hosts typically branch on the kind (for example, to skip items whose
/// fields have the wrong type while aborting on anything else).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    /// An operator or function was applied to operands of the wrong type.
    TypeMismatch,
    /// A call named nothing that is bound.
    UnknownFunction,
    /// A variable reference named nothing that is bound.
    UnknownVariable,
    /// Integer division or remainder by zero.
    DivisionByZero,
    /// A call supplied the wrong number of arguments.
    ArityMismatch,
    /// User-defined calls nested deeper than the configured limit.
    StackOverflow,
    /// Integer arithmetic overflowed.
    Overflow,
    /// An index lay outside a string.
    IndexOutOfBounds,
    /// An argument had the right type but an unusable value.
    InvalidArgument,
    /// A construct that yields no value was used where a value is required.
    MissingValue,
    /// A constant binding was rebound in its own scope.
    ConstantRebinding,
    /// The host broke the interpreter's usage protocol.
    Internal,
}

impl std::fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::TypeMismatch => "Type mismatch",
            Self::UnknownFunction => "Unknown function",
            Self::UnknownVariable => "Unknown variable",
            Self::DivisionByZero => "Division by zero",
            Self::ArityMismatch => "Argument count mismatch",
            Self::StackOverflow => "Stack overflow",
            Self::Overflow => "Integer overflow",
            Self::IndexOutOfBounds => "Index out of bounds",
            Self::InvalidArgument => "Invalid argument",
            Self::MissingValue => "Value missing",
            Self::ConstantRebinding => "Constant rebinding",
            Self::Internal => "Internal error",
        };
        write!(f, "{name}")
    }
}

/// An error raised while evaluating a well-formed program.
///
/// Errors raised inside a user-defined function are wrapped once per call
/// frame, so `cause` forms a chain from the outermost call site down to the
/// operation that actually failed. The wrapper keeps the kind of the original
/// error.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalError {
    /// What went wrong.
    pub kind:    EvalErrorKind,
    /// Human readable details.
    pub message: String,
    /// Where it went wrong, when known.
    pub pos:     Option<Position>,
    /// The error this one wraps.
    pub cause:   Option<Box<Self>>,
}

impl EvalError {
    /// Creates an error with a position and no cause.
    #[must_use]
    pub fn new(kind: EvalErrorKind, message: impl Into<String>, pos: Position) -> Self {
        Self { kind,
               message: message.into(),
               pos: Some(pos),
               cause: None }
    }

    /// Creates an error that has no meaningful source position.
    #[must_use]
    pub fn without_position(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        Self { kind,
               message: message.into(),
               pos: None,
               cause: None }
    }

    /// Supplies a position to an error raised without one.
    #[must_use]
    pub fn at(mut self, pos: Position) -> Self {
        self.pos.get_or_insert(pos);
        self
    }

    /// Wraps `self` as the cause of a failure inside the named function,
    /// called at `pos`.
    ///
    /// Consecutive frames of the same recursive function collapse into one
    /// wrapper, positioned at the outermost call.
    #[must_use]
    pub fn in_function(mut self, name: &str, pos: Position) -> Self {
        let message = format!("in call to '{name}'");
        if self.cause.is_some() && self.message == message {
            self.pos = Some(pos);
            return self;
        }
        Self { kind: self.kind,
               message,
               pos: Some(pos),
               cause: Some(Box::new(self)) }
    }

    /// Follows the cause chain to the innermost error.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Some(cause) = &current.cause {
            current = cause;
        }
        current
    }

    /// Shorthand for a [`EvalErrorKind::TypeMismatch`] error.
    #[must_use]
    pub fn type_mismatch(message: impl Into<String>, pos: Position) -> Self {
        Self::new(EvalErrorKind::TypeMismatch, message, pos)
    }

    /// Shorthand for a [`EvalErrorKind::InvalidArgument`] error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>, pos: Position) -> Self {
        Self::new(EvalErrorKind::InvalidArgument, message, pos)
    }

    /// Shorthand for a [`EvalErrorKind::Overflow`] error.
    #[must_use]
    pub fn overflow(pos: Position) -> Self {
        Self::new(EvalErrorKind::Overflow,
                  "integer overflow while trying to compute result",
                  pos)
    }

    /// Shorthand for a [`EvalErrorKind::MissingValue`] error.
    #[must_use]
    pub fn missing_value(pos: Position) -> Self {
        Self::new(EvalErrorKind::MissingValue, "expression produced no value", pos)
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "Error on {pos}: {}: {}.", self.kind, self.message)?,
            None => write!(f, "Error: {}: {}.", self.kind, self.message)?,
        }
        if let Some(cause) = &self.cause {
            write!(f, "\n  caused by: {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
