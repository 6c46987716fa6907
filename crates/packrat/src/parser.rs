//! The parser handle and its functional core.
//!
//! A [`Parser<T>`] is a shared, immutable function from a position in the
//! current [`Session`]'s input to an [`Outcome<T>`]. Every combinator in
//! this crate is built by wrapping such a function; clients can write new
//! primitives the same way with [`Parser::new`].
//!
//! The core forms a state monad over the input offset:
//! [`Parser::pure`] succeeds without consuming, and [`Parser::bind`] feeds
//! the value of one parser into the construction of the next, which runs
//! at the first parser's end offset.

use crate::outcome::Outcome;
use crate::session::Session;
use std::fmt;
use std::rc::Rc;

type Core<T> = dyn Fn(&mut Session<'_>, usize) -> Outcome<T>;

/// A composable parser producing values of type `T`.
///
/// Cloning is cheap and shares the underlying function. Parsers carry no
/// per-run state, so one graph can serve any number of [`run`]s.
///
/// [`run`]: crate::run
pub struct Parser<T> {
    core: Rc<Core<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            core: Rc::clone(&self.core),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("output", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Parser<T> {
    /// Wrap a core evaluation function.
    ///
    /// The function must not report a success offset smaller than the
    /// offset it was given.
    pub fn new<F>(core: F) -> Self
    where
        F: Fn(&mut Session<'_>, usize) -> Outcome<T> + 'static,
    {
        Parser {
            core: Rc::new(core),
        }
    }

    /// Evaluate this parser at `offset` of the session's input.
    #[inline]
    pub fn parse_at(&self, session: &mut Session<'_>, offset: usize) -> Outcome<T> {
        (self.core)(session, offset)
    }

    /// Succeed with `value` without consuming input.
    pub fn pure(value: T) -> Self
    where
        T: Clone,
    {
        Parser::new(move |_, offset| Outcome::success(value.clone(), offset))
    }

    /// Run this parser, then the parser built from its value.
    pub fn bind<U, F>(&self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Parser<U> + 'static,
    {
        let first = self.clone();
        Parser::new(move |session, offset| {
            first
                .parse_at(session, offset)
                .and_then(|value, next| f(value).parse_at(session, next))
        })
    }

    /// Transform the value of a success.
    pub fn map<U, F>(&self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        crate::primitive::map(self, f)
    }

    /// Ordered choice: this parser, or `other` at the same offset.
    #[must_use]
    pub fn or(&self, other: &Parser<T>) -> Parser<T> {
        crate::primitive::alt(self, other)
    }

    /// This parser followed by `other`, keeping both values.
    pub fn then<U: 'static>(&self, other: &Parser<U>) -> Parser<(T, U)> {
        crate::primitive::seq(self, other)
    }

    /// This parser followed by `other`, keeping this parser's value.
    #[must_use]
    pub fn then_ignore<U: 'static>(&self, other: &Parser<U>) -> Parser<T> {
        crate::primitive::seq_left(self, other)
    }

    /// This parser followed by `other`, keeping `other`'s value.
    pub fn ignore_then<U: 'static>(&self, other: &Parser<U>) -> Parser<U> {
        crate::primitive::seq_right(self, other)
    }

    /// Zero or more repetitions.
    pub fn many(&self) -> Parser<Vec<T>> {
        crate::primitive::rep(self)
    }

    /// Zero or one occurrence.
    pub fn optional(&self) -> Parser<Option<T>>
    where
        T: Clone,
    {
        crate::derived::maybe(self)
    }
}
