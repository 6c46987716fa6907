//! Errors reported by grammar construction and whole-input parsing.
//!
//! Grammar mismatches are not errors: a combinator that does not match
//! returns [`Outcome::Failure`](crate::Outcome::Failure). The types here
//! cover the two places where a `Result` is the natural interface.

/// A grammar could not be built.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    /// A regular expression failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as written by the grammar author.
        pattern: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}

/// The input as a whole was not accepted.
///
/// Carries no position or expectation set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The grammar did not match the complete input.
    #[error("input did not match the grammar")]
    NoMatch,
}
