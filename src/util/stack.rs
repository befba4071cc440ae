/// Bytes of stack that must remain before a recursive step grows the stack.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first switching to a fresh stack segment if fewer than
/// [`RED_ZONE`] bytes remain on the current one.
///
/// The parser and evaluator recurse once per nesting level of the source
/// program, so deeply nested input (or a deep chain of user function calls
/// below the configured call-depth limit) would otherwise overflow the native
/// stack and abort the process.
///
/// ## Example
/// ```
/// use vela::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u32) -> u32 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
