use bitflags::bitflags;

/// The type tag carried by every [`Operand`](super::core::Operand).
///
/// The lower-case [`Display`](std::fmt::Display) form is also the spelling
/// used in parameter and return type annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// 64-bit signed integer.
    Integer,
    /// 64-bit floating-point number.
    Real,
    /// Immutable text.
    String,
    /// `true` or `false`.
    Boolean,
    /// Ordered sequence of operands of any type.
    List,
    /// A builtin or user-defined callable.
    Function,
}

impl Type {
    /// Every type, in declaration order.
    pub const ALL: [Self; 6] = [Self::Integer,
                                Self::Real,
                                Self::String,
                                Self::Boolean,
                                Self::List,
                                Self::Function];

    /// Resolves a type annotation keyword.
    ///
    /// ## Example
    /// ```
    /// use vela::interpreter::value::types::Type;
    ///
    /// assert_eq!(Type::from_name("real"), Some(Type::Real));
    /// assert_eq!(Type::from_name("Real"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    /// The annotation keyword for this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Function => "function",
        }
    }

    /// Returns `true` for integer and real.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

bitflags! {
    /// A set of accepted types for one builtin parameter position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeSet: u8 {
        const INTEGER  = 1 << 0;
        const REAL     = 1 << 1;
        const STRING   = 1 << 2;
        const BOOLEAN  = 1 << 3;
        const LIST     = 1 << 4;
        const FUNCTION = 1 << 5;

        const NUMERIC  = Self::INTEGER.bits() | Self::REAL.bits();
        const ANY      = Self::NUMERIC.bits()
                       | Self::STRING.bits()
                       | Self::BOOLEAN.bits()
                       | Self::LIST.bits()
                       | Self::FUNCTION.bits();
    }
}

impl From<Type> for TypeSet {
    fn from(ty: Type) -> Self {
        match ty {
            Type::Integer => Self::INTEGER,
            Type::Real => Self::REAL,
            Type::String => Self::STRING,
            Type::Boolean => Self::BOOLEAN,
            Type::List => Self::LIST,
            Type::Function => Self::FUNCTION,
        }
    }
}

impl TypeSet {
    /// Tests whether `ty` is a member of this set.
    ///
    /// ## Example
    /// ```
    /// use vela::interpreter::value::types::{Type, TypeSet};
    ///
    /// assert!(TypeSet::NUMERIC.accepts(Type::Integer));
    /// assert!(!TypeSet::NUMERIC.accepts(Type::String));
    /// ```
    #[must_use]
    pub fn accepts(self, ty: Type) -> bool {
        self.contains(Self::from(ty))
    }
}

impl std::fmt::Display for TypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::ANY {
            return write!(f, "any");
        }
        if *self == Self::NUMERIC {
            return write!(f, "numeric");
        }
        let names = Type::ALL.into_iter()
                             .filter(|ty| self.accepts(*ty))
                             .map(Type::name)
                             .collect::<Vec<_>>();
        write!(f, "{}", names.join(" or "))
    }
}
