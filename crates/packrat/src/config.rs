//! Per-run configuration.
//!
//! The defaults are what a grammar normally wants; the switches exist for
//! measuring the effect of memoization and for hosts that manage their own
//! stack.

/// Configuration for a single driver run.
///
/// # Example
///
/// ```text
/// let config = RunConfig::new().memoize(false);
/// let run = run_with(&grammar, "1+2*3", &config);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Memoize `cache` wrappers in a per-run side table.
    ///
    /// When off, every `cache` evaluation re-runs its rule, and re-entering
    /// a rule at the same offset is no longer cut off.
    pub memoize: bool,
    /// Grow the native stack on demand while evaluating `cache` wrappers.
    pub grow_stack: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            memoize: true,
            grow_stack: true,
        }
    }
}

impl RunConfig {
    /// The default configuration: memoized, with stack growth.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable memoization.
    #[must_use]
    pub fn memoize(mut self, on: bool) -> Self {
        self.memoize = on;
        self
    }

    /// Enable or disable on-demand stack growth.
    #[must_use]
    pub fn grow_stack(mut self, on: bool) -> Self {
        self.grow_stack = on;
        self
    }
}
