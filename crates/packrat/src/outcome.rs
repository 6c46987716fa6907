//! Two-way outcome of running a parser at an offset.
//!
//! Unlike a diagnostic parser, a packrat combinator reports only *whether*
//! it matched and, if so, where the match ended:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Success` | Matched; `offset` is the first byte after the consumed input |
//! | `Failure` | Did not match; the caller tries its next alternative |
//!
//! A failure carries no message and no position. Callers that need to know
//! *why* a parse failed must encode that in their grammar.

use crate::error::ParseError;

/// The outcome of evaluating a parser at some offset of the input.
///
/// `Success::offset` is never smaller than the offset the parser was
/// evaluated at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The parser matched.
    Success {
        /// The parsed value.
        value: T,
        /// Offset immediately following the consumed input.
        offset: usize,
    },
    /// The parser did not match.
    Failure,
}

impl<T> Outcome<T> {
    // === Constructors ===

    /// Create a successful outcome ending at `offset`.
    #[inline]
    pub fn success(value: T, offset: usize) -> Self {
        Self::Success { value, offset }
    }

    /// Create a failed outcome.
    #[inline]
    pub fn failure() -> Self {
        Self::Failure
    }

    // === Predicates ===

    /// Returns `true` if the parser matched.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns `true` if the parser did not match.
    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    // === Accessors ===

    /// Borrow the parsed value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure => None,
        }
    }

    /// The end offset of a successful match, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Success { offset, .. } => Some(*offset),
            Self::Failure => None,
        }
    }

    /// Convert into the value and end offset, discarding failure.
    pub fn into_success(self) -> Option<(T, usize)> {
        match self {
            Self::Success { value, offset } => Some((value, offset)),
            Self::Failure => None,
        }
    }

    /// Get the value and end offset of a success.
    ///
    /// Callers must check [`Outcome::is_success`] first.
    ///
    /// # Panics
    /// Panics if this is a `Failure`.
    #[track_caller]
    pub fn unwrap_success(self) -> (T, usize) {
        match self {
            Self::Success { value, offset } => (value, offset),
            Self::Failure => panic!("called `Outcome::unwrap_success()` on a `Failure`"),
        }
    }

    // === Transformations ===

    /// Map the success value, keeping the offset.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Success { value, offset } => Outcome::Success {
                value: f(value),
                offset,
            },
            Self::Failure => Outcome::Failure,
        }
    }

    /// Continue from a success with its value and end offset.
    pub fn and_then<U, F: FnOnce(T, usize) -> Outcome<U>>(self, f: F) -> Outcome<U> {
        match self {
            Self::Success { value, offset } => f(value, offset),
            Self::Failure => Outcome::Failure,
        }
    }

    /// Try an alternative if this failed.
    #[must_use]
    pub fn or_else<F: FnOnce() -> Outcome<T>>(self, f: F) -> Outcome<T> {
        match self {
            Self::Success { .. } => self,
            Self::Failure => f(),
        }
    }

    /// Convert to `Result`, discarding the end offset.
    pub fn into_result(self) -> Result<T, ParseError> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure => Err(ParseError::NoMatch),
        }
    }
}

// === Conversions ===

impl<T> From<Outcome<T>> for Result<T, ParseError> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T> From<Outcome<T>> for Option<(T, usize)> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_success()
    }
}
