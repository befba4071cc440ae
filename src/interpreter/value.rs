/// Runtime operands.
///
/// Defines the `Operand` enum, its conversions from host values and
/// literals, VeLa's equality rules and the human-readable rendering used for
/// results and string conversion.
pub mod core;
/// Callable values.
///
/// A `Function` is either one of the fixed builtins or a user-defined
/// function sharing its definition with the program that declared it.
pub mod function;
/// Type tags and type sets.
///
/// `Type` names the six VeLa types; `TypeSet` describes which types a builtin
/// accepts at a given argument position.
pub mod types;
