/// Binary operator dispatch.
///
/// Evaluates operands in order and routes each operator to its handler;
/// the logical operators are routed before their right operand is evaluated.
pub mod core;

/// Arithmetic on integers, reals and strings.
///
/// Integer arithmetic is overflow checked; mixed operands widen to real.
pub mod arithmetic;

/// Equality, ordering, membership and `=~` pattern matching.
pub mod comparison;

/// Exponentiation.
pub mod power;

/// Short-circuit logical operators.
pub mod logic;
