use crate::interpreter::evaluator::core::DEFAULT_MAX_CALL_DEPTH;

/// Tunables for an [`Interpreter`](crate::Interpreter).
///
/// ## Example
/// ```
/// use vela::{Interpreter, InterpreterConfig};
///
/// let config = InterpreterConfig { max_call_depth: 64,
///                                  ..InterpreterConfig::default() };
/// let mut vela = Interpreter::with_config(config);
///
/// assert!(vela.program("fun f(n) { f(n + 1) }; f(0)").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// User-defined calls nested deeper than this fail with `StackOverflow`.
    pub max_call_depth:      usize,
    /// Whether parsed programs are cached by their source text.
    pub cache_programs:      bool,
    /// The cache is cleared once it holds this many programs.
    pub max_cached_programs: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { max_call_depth:      DEFAULT_MAX_CALL_DEPTH,
               cache_programs:      true,
               max_cached_programs: 1024, }
    }
}
