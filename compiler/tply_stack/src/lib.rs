//! Stack growth for recursive descent.
//!
//! The parser recurses once per nested expression or block, and the
//! evaluator recurses once per nested body. Templates generated by other
//! tools can nest far deeper than hand-written ones, so both phases wrap
//! their recursive entry points in [`with_stack`].
//!
//! On `wasm32` the call is a plain passthrough.

/// Grow when less than this much stack remains.
#[cfg(not(target_arch = "wasm32"))]
const MIN_REMAINING: usize = 128 * 1024;

/// Size of each newly allocated segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[cfg(not(target_arch = "wasm32"))]
#[inline]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(MIN_REMAINING, SEGMENT, f)
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
