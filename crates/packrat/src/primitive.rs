//! Primitive combinators.
//!
//! Every other parser in the crate, and every client grammar, is built
//! from these. Offsets count bytes of the input; the single-unit matchers
//! consume exactly one byte.
//!
//! All primitives are pure: a failing parser leaves nothing behind, and the
//! caller's next alternative starts from the same offset.

use crate::outcome::Outcome;
use crate::parser::Parser;
use tracing::trace;

/// Match one byte satisfying `pred`.
pub fn one_of<P>(pred: P) -> Parser<u8>
where
    P: Fn(u8) -> bool + 'static,
{
    Parser::new(move |session, offset| match session.bytes().get(offset) {
        Some(&byte) if pred(byte) => Outcome::success(byte, offset + 1),
        _ => Outcome::Failure,
    })
}

/// Match exactly the byte `c`.
pub fn chr(c: u8) -> Parser<u8> {
    one_of(move |byte| byte == c)
}

/// Match one byte *not* satisfying `pred`. Fails at end of input.
pub fn none_of<P>(pred: P) -> Parser<u8>
where
    P: Fn(u8) -> bool + 'static,
{
    one_of(move |byte| !pred(byte))
}

/// Match the literal `lit`, case-sensitively, byte for byte.
pub fn text(lit: impl Into<String>) -> Parser<String> {
    let lit: String = lit.into();
    Parser::new(move |session, offset| {
        let rest = session.bytes().get(offset..).unwrap_or_default();
        if rest.starts_with(lit.as_bytes()) {
            Outcome::success(lit.clone(), offset + lit.len())
        } else {
            Outcome::Failure
        }
    })
}

/// Run `p1`, then `p2` from where `p1` stopped.
pub fn seq<A: 'static, B: 'static>(p1: &Parser<A>, p2: &Parser<B>) -> Parser<(A, B)> {
    let (p1, p2) = (p1.clone(), p2.clone());
    Parser::new(move |session, offset| {
        p1.parse_at(session, offset)
            .and_then(|a, next| p2.parse_at(session, next).map(|b| (a, b)))
    })
}

/// Run `p1` then `p2`, keeping only `p1`'s value.
pub fn seq_left<A: 'static, B: 'static>(p1: &Parser<A>, p2: &Parser<B>) -> Parser<A> {
    map(&seq(p1, p2), |(a, _)| a)
}

/// Run `p1` then `p2`, keeping only `p2`'s value.
pub fn seq_right<A: 'static, B: 'static>(p1: &Parser<A>, p2: &Parser<B>) -> Parser<B> {
    map(&seq(p1, p2), |(_, b)| b)
}

/// Ordered choice.
///
/// `p2` is tried, at the original offset, only if `p1` fails. The first
/// success wins; there is no merging of alternatives.
pub fn alt<T: 'static>(p1: &Parser<T>, p2: &Parser<T>) -> Parser<T> {
    let (p1, p2) = (p1.clone(), p2.clone());
    Parser::new(move |session, offset| {
        p1.parse_at(session, offset)
            .or_else(|| p2.parse_at(session, offset))
    })
}

/// Apply `f` to the value of a success.
pub fn map<A, B, F>(p: &Parser<A>, f: F) -> Parser<B>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> B + 'static,
{
    let p = p.clone();
    Parser::new(move |session, offset| p.parse_at(session, offset).map(&f))
}

/// Always succeed with `value`, consuming nothing.
pub fn just<T: Clone + 'static>(value: T) -> Parser<T> {
    Parser::pure(value)
}

/// Always fail, consuming nothing.
pub fn fail<T: 'static>() -> Parser<T> {
    Parser::new(|_, _| Outcome::Failure)
}

/// Succeed with the current offset, consuming nothing.
pub fn position() -> Parser<usize> {
    Parser::new(|_, offset| Outcome::success(offset, offset))
}

/// Zero or more repetitions of `p`, in order. Always succeeds.
///
/// Repetition stops at the first failure of `p`, which is discarded. It
/// also stops if `p` succeeds without consuming anything: that success is
/// discarded too, since repeating it could never end.
pub fn rep<T: 'static>(p: &Parser<T>) -> Parser<Vec<T>> {
    let p = p.clone();
    Parser::new(move |session, offset| {
        let mut values = Vec::new();
        let mut at = offset;
        while let Outcome::Success { value, offset: next } = p.parse_at(session, at) {
            if next == at {
                trace!(offset = at, count = values.len(), "repetition made no progress");
                break;
            }
            values.push(value);
            at = next;
        }
        Outcome::success(values, at)
    })
}

/// Succeed with `()` only at the end of the input.
pub fn eof() -> Parser<()> {
    Parser::new(|session, offset| {
        if offset == session.input_len() {
            Outcome::success((), offset)
        } else {
            Outcome::Failure
        }
    })
}

/// Ordered choice over any number of alternatives, tried left to right.
///
/// ```text
/// let atom = alts![number, variable, brackets(&expr)];
/// ```
#[macro_export]
macro_rules! alts {
    ($first:expr $(,)?) => {
        ::std::clone::Clone::clone(&$first)
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::alt(&$first, &$crate::alts!($($rest),+))
    };
}
