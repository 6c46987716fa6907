//! Stack growth for deeply recursive grammars.
//!
//! Recursive rules re-enter each other through `cache`, so the native call
//! depth follows the nesting depth of the input. A right-recursive list
//! rule over ten thousand elements recurses ten thousand times.
//!
//! - **Native targets**: `stacker` allocates a fresh segment when the
//!   remaining stack drops below the red zone.
//! - **WASM targets**: plain call.

/// Remaining stack below which a new segment is allocated (128KB).
///
/// One trip through a rule can pass through a dozen nested combinator
/// frames before it reaches the next `cache`.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Run `f` under [`ensure_sufficient_stack`] only when `grow` is set.
#[inline]
pub(crate) fn with_stack<R>(grow: bool, f: impl FnOnce() -> R) -> R {
    if grow {
        ensure_sufficient_stack(f)
    } else {
        f()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_recursion() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        assert_eq!(depth(100_000), 100_000);
    }

    #[test]
    fn test_with_stack_passes_result_through() {
        assert_eq!(with_stack(true, || 42), 42);
        assert_eq!(with_stack(false, || "flat"), "flat");
    }
}
