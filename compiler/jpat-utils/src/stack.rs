//! Utilities for growing the native stack on demand, used by deeply
//! recursive passes such as the usefulness computation.

/// The amount of stack that must be left before a new segment is allocated.
const RED_ZONE: usize = 100 * 1024; // 100k

/// The size of a newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024; // 1MB

/// Grows the stack on demand to prevent stack overflow. Call this in strategic
/// locations to "break up" recursive calls.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
