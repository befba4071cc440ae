/// Function call machinery.
///
/// Resolves callees, evaluates arguments and runs user-defined functions in
/// their own scope.
pub mod core;

/// The builtin table.
///
/// Declares every builtin with its signatures and builds the base scope.
pub mod table;

/// Numeric builtins: `abs`, `min`, `max`, rounding, roots, trigonometry,
/// logarithms and `pow`.
pub mod math;

/// String builtins.
pub mod string;

/// Conversions between operand types.
pub mod convert;

/// List construction and access.
pub mod list;

/// `map`, `filter` and `reduce`.
pub mod higher_order;
