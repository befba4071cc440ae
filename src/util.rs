/// Numeric conversion helpers.
///
/// This module provides the conversions between `i64`, `usize` and `f64` that
/// the evaluator and builtins need. Lossy widening is explicit and named;
/// every narrowing conversion is checked and reports failure through a
/// caller-supplied error.
pub mod num;
/// Native stack protection.
///
/// Recursive descent over arbitrarily nested source needs more stack than the
/// default thread provides. This module grows the stack on demand.
pub mod stack;
