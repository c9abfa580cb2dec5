//! Stack growth for deeply nested reductions.
//!
//! Every reduction step re-enters the dispatcher, so nesting in the program
//! term (and `reduce`/`eval` re-entry) turns into native recursion. The
//! default dispatcher runs each step through [`ensure_sufficient_stack`].
//!
//! On wasm the closure is called directly; the runtime manages its own stack.

/// Grow the stack when less than this remains (128KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (2MB).
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
