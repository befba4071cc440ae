use crate::{
    ast::Position,
    error::{EvalError, EvalErrorKind},
    interpreter::{
        environment::Bindings,
        evaluator::{
            core::{Context, EvalResult},
            function::{convert, higher_order, list, math, string},
        },
        value::{core::Operand, function::Function, types::TypeSet},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context (higher-order builtins call back
/// into it), the evaluated arguments, and the call position. Arguments have
/// already been checked against one of the builtin's signatures.
type BuiltinFn = fn(&mut Context, &[Operand], Position) -> EvalResult<Operand>;

const ANY: TypeSet = TypeSet::ANY;
const NUMERIC: TypeSet = TypeSet::NUMERIC;
const INTEGER: TypeSet = TypeSet::INTEGER;
const STRING: TypeSet = TypeSet::STRING;
const LIST: TypeSet = TypeSet::LIST;
const FUNCTION: TypeSet = TypeSet::FUNCTION;

/// One accepted argument shape of a builtin.
///
/// `params` lists the accepted types position by position. A variadic
/// signature accepts any number of further arguments of type `rest`.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    params: &'static [TypeSet],
    rest:   Option<TypeSet>,
}

impl Signature {
    const fn fixed(params: &'static [TypeSet]) -> Self {
        Self { params,
               rest: None }
    }

    const fn variadic(params: &'static [TypeSet], rest: TypeSet) -> Self {
        Self { params,
               rest: Some(rest) }
    }

    /// Tests whether `n` arguments fit this signature.
    fn accepts_count(&self, n: usize) -> bool {
        n == self.params.len() || (self.rest.is_some() && n > self.params.len())
    }

    /// Tests whether the arguments fit this signature by count and type.
    fn accepts(&self, args: &[Operand]) -> bool {
        self.accepts_count(args.len())
        && args.iter().enumerate().all(|(i, arg)| {
                                      self.params
                                          .get(i)
                                          .copied()
                                          .or(self.rest)
                                          .is_some_and(|set| set.accepts(arg.get_type()))
                                  })
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = self.params.iter().map(ToString::to_string).collect::<Vec<_>>();
        if let Some(rest) = self.rest {
            parts.push(format!("{rest}..."));
        }
        write!(f, "({})", parts.join(", "))
    }
}

/// Defines builtin functions by generating an identifying enum and a lookup
/// table.
///
/// Each entry provides:
/// - the enum variant,
/// - the VeLa name,
/// - the accepted signatures,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `Builtin` (one variant per entry),
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table indexed by variant),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $variant:ident => $name:literal {
                signatures: $signatures:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Identifies one of the builtin functions.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Builtin {
            $(
                #[doc = concat!("The `", $name, "` builtin.")]
                $variant,
            )*
        }

        struct BuiltinDef {
            name:       &'static str,
            signatures: &'static [Signature],
            func:       BuiltinFn,
        }

        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, signatures: $signatures, func: $func },
            )*
        ];

        impl Builtin {
            /// Every builtin, in table order.
            pub const ALL: &'static [Self] = &[
                $(Self::$variant,)*
            ];
        }

        /// Names of all builtin functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    Abs        => "abs"        { signatures: &[Signature::fixed(&[NUMERIC])], func: math::abs },
    Min        => "min"        { signatures: &[Signature::fixed(&[NUMERIC, NUMERIC]), Signature::fixed(&[LIST])], func: math::min },
    Max        => "max"        { signatures: &[Signature::fixed(&[NUMERIC, NUMERIC]), Signature::fixed(&[LIST])], func: math::max },
    Round      => "round"      { signatures: &[Signature::fixed(&[NUMERIC])], func: math::round },
    Floor      => "floor"      { signatures: &[Signature::fixed(&[NUMERIC])], func: math::floor },
    Ceil       => "ceil"       { signatures: &[Signature::fixed(&[NUMERIC])], func: math::ceil },
    Sqrt       => "sqrt"       { signatures: &[Signature::fixed(&[NUMERIC])], func: math::sqrt },
    Sin        => "sin"        { signatures: &[Signature::fixed(&[NUMERIC])], func: math::sin },
    Cos        => "cos"        { signatures: &[Signature::fixed(&[NUMERIC])], func: math::cos },
    Tan        => "tan"        { signatures: &[Signature::fixed(&[NUMERIC])], func: math::tan },
    Exp        => "exp"        { signatures: &[Signature::fixed(&[NUMERIC])], func: math::exp },
    Ln         => "ln"         { signatures: &[Signature::fixed(&[NUMERIC])], func: math::ln },
    Log10      => "log10"      { signatures: &[Signature::fixed(&[NUMERIC])], func: math::log10 },
    Pow        => "pow"        { signatures: &[Signature::fixed(&[NUMERIC, NUMERIC])], func: math::pow },
    Length     => "length"     { signatures: &[Signature::fixed(&[STRING]), Signature::fixed(&[LIST])], func: string::length },
    Substring  => "substring"  { signatures: &[Signature::fixed(&[STRING, INTEGER, INTEGER])], func: string::substring },
    Concat     => "concat"     { signatures: &[Signature::variadic(&[STRING], STRING), Signature::variadic(&[LIST], LIST)], func: string::concat },
    Contains   => "contains"   { signatures: &[Signature::fixed(&[STRING, STRING])], func: string::contains },
    StartsWith => "startswith" { signatures: &[Signature::fixed(&[STRING, STRING])], func: string::starts_with },
    EndsWith   => "endswith"   { signatures: &[Signature::fixed(&[STRING, STRING])], func: string::ends_with },
    ToUpper    => "toupper"    { signatures: &[Signature::fixed(&[STRING])], func: string::to_upper },
    ToLower    => "tolower"    { signatures: &[Signature::fixed(&[STRING])], func: string::to_lower },
    Trim       => "trim"       { signatures: &[Signature::fixed(&[STRING])], func: string::trim },
    Str        => "str"        { signatures: &[Signature::fixed(&[ANY])], func: convert::str },
    Integer    => "integer"    { signatures: &[Signature::fixed(&[NUMERIC]), Signature::fixed(&[STRING])], func: convert::integer },
    Real       => "real"       { signatures: &[Signature::fixed(&[NUMERIC]), Signature::fixed(&[STRING])], func: convert::real },
    TypeOf     => "typeof"     { signatures: &[Signature::fixed(&[ANY])], func: convert::type_of },
    List       => "list"       { signatures: &[Signature::variadic(&[], ANY)], func: list::list },
    Nth        => "nth"        { signatures: &[Signature::fixed(&[LIST, INTEGER])], func: list::nth },
    Head       => "head"       { signatures: &[Signature::fixed(&[LIST])], func: list::head },
    Tail       => "tail"       { signatures: &[Signature::fixed(&[LIST])], func: list::tail },
    Append     => "append"     { signatures: &[Signature::fixed(&[LIST, ANY])], func: list::append },
    Seq        => "seq"        { signatures: &[Signature::fixed(&[NUMERIC, NUMERIC, NUMERIC])], func: list::seq },
    Map        => "map"        { signatures: &[Signature::fixed(&[FUNCTION, LIST])], func: higher_order::map },
    Filter     => "filter"     { signatures: &[Signature::fixed(&[FUNCTION, LIST])], func: higher_order::filter },
    Reduce     => "reduce"     { signatures: &[Signature::fixed(&[FUNCTION, LIST, ANY])], func: higher_order::reduce },
}

impl Builtin {
    fn def(self) -> &'static BuiltinDef {
        &BUILTIN_TABLE[self as usize]
    }

    /// The name the builtin is bound to in the base scope.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Finds a builtin by name.
    ///
    /// ## Example
    /// ```
    /// use vela::interpreter::evaluator::function::table::Builtin;
    ///
    /// assert_eq!(Builtin::lookup("startswith"), Some(Builtin::StartsWith));
    /// assert_eq!(Builtin::lookup("print"), None);
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// The accepted argument shapes.
    #[must_use]
    pub fn signatures(self) -> &'static [Signature] {
        self.def().signatures
    }

    /// Checks the arguments against the builtin's signatures and invokes it.
    ///
    /// # Errors
    /// - `ArityMismatch` if no signature takes `args.len()` arguments.
    /// - `TypeMismatch` if some signature takes that many arguments but none
    ///   accepts their types.
    /// - Anything the builtin itself raises.
    pub fn call(self,
                context: &mut Context,
                args: &[Operand],
                pos: Position)
                -> EvalResult<Operand> {
        let def = self.def();

        if !def.signatures.iter().any(|sig| sig.accepts_count(args.len())) {
            return Err(EvalError::new(EvalErrorKind::ArityMismatch,
                                      format!("'{}' cannot take {} argument(s); expected {}",
                                              def.name,
                                              args.len(),
                                              describe(def.signatures)),
                                      pos));
        }
        if !def.signatures.iter().any(|sig| sig.accepts(args)) {
            let given = args.iter()
                            .map(|arg| arg.get_type().to_string())
                            .collect::<Vec<_>>()
                            .join(", ");
            return Err(EvalError::type_mismatch(format!("'{}' cannot be applied to ({given}); expected {}",
                                                        def.name,
                                                        describe(def.signatures)),
                                                pos));
        }

        (def.func)(context, args, pos)
    }
}

fn describe(signatures: &[Signature]) -> String {
    signatures.iter()
              .map(ToString::to_string)
              .collect::<Vec<_>>()
              .join(" or ")
}

/// The contents of a fresh base scope: every builtin under its name, plus the
/// constants `PI` and `E`.
#[must_use]
pub fn base_bindings() -> Bindings {
    Builtin::ALL.iter()
                .map(|b| (b.name(), Operand::Function(Function::Builtin(*b))))
                .chain([("PI", Operand::Real(std::f64::consts::PI)),
                        ("E", Operand::Real(std::f64::consts::E))])
                .collect()
}
