//! Regular expressions anchored at the current offset.
//!
//! The engine needs exactly one capability from a regex library: match a
//! pattern starting *exactly* at a given offset and report the matched
//! text. [`AnchoredMatcher`] is that seam; [`Pattern`] implements it with
//! the `regex` crate.
//!
//! # Matching semantics
//!
//! `Pattern` compiles `\A(?:pattern)` and runs it on the suffix of the
//! input starting at the offset. The `regex` crate uses leftmost-first
//! semantics: among matches starting at the anchor it reports the one a
//! backtracking engine would find first (`a|ab` on `"ab"` matches `"a"`),
//! not the POSIX leftmost-longest match. Greedy repetition is still greedy:
//! `ba+r` consumes every `a`. Matching time is linear in the input.
//!
//! An offset inside a multi-byte UTF-8 character never matches.

use crate::error::GrammarError;
use crate::outcome::Outcome;
use crate::parser::Parser;
use regex::Regex;

/// A pattern matcher that can be anchored at an offset.
pub trait AnchoredMatcher {
    /// Match starting exactly at byte `start` of `text`, returning the
    /// matched slice, or `None` if there is no match starting there.
    fn match_at<'t>(&self, text: &'t str, start: usize) -> Option<&'t str>;
}

/// A compiled, start-anchored regular expression.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `pattern`, anchoring it at the start of the haystack.
    pub fn new(pattern: &str) -> Result<Self, GrammarError> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})")).map_err(|source| {
            GrammarError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Pattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written, without the anchor.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl AnchoredMatcher for Pattern {
    fn match_at<'t>(&self, text: &'t str, start: usize) -> Option<&'t str> {
        let rest = text.get(start..)?;
        // Unbalanced groups in the source can escape the `\A` wrapper.
        self.regex
            .find(rest)
            .filter(|m| m.start() == 0)
            .map(|m| m.as_str())
    }
}

/// Match with any anchored matcher, yielding the matched text.
pub fn matching<M: AnchoredMatcher + 'static>(matcher: M) -> Parser<String> {
    Parser::new(move |session, offset| match matcher.match_at(session.text(), offset) {
        Some(found) => Outcome::success(found.to_string(), offset + found.len()),
        None => Outcome::Failure,
    })
}

/// Match the regular expression `pattern` at the current offset.
///
/// See the [module documentation](self) for the matching semantics.
pub fn regex(pattern: &str) -> Result<Parser<String>, GrammarError> {
    Ok(matching(Pattern::new(pattern)?))
}
