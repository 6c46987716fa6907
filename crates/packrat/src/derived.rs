//! Combinators derived from the primitives.
//!
//! Nothing here adds an evaluation rule: each function is a composition of
//! [`seq`], [`alt`], [`map`], [`rep`] and friends, and behaves exactly as
//! that composition would.

use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::primitive::{alt, chr, just, map, one_of, rep, seq, seq_left, seq_right, text};

fn cons<T>((first, mut rest): (T, Vec<T>)) -> Vec<T> {
    rest.insert(0, first);
    rest
}

fn empty_list<T: 'static>() -> Parser<Vec<T>> {
    Parser::new(|_, offset| Outcome::success(Vec::new(), offset))
}

/// One or more repetitions of `p`.
pub fn many1<T: 'static>(p: &Parser<T>) -> Parser<Vec<T>> {
    map(&seq(p, &rep(p)), cons)
}

/// One or more `p`, separated by `sep`. Separator values are discarded.
pub fn sep_by1<T: 'static, S: 'static>(p: &Parser<T>, sep: &Parser<S>) -> Parser<Vec<T>> {
    map(&seq(p, &rep(&seq_right(sep, p))), cons)
}

/// Zero or more `p`, separated by `sep`.
///
/// A dangling separator is not consumed: `x,` yields one element and stops
/// before the comma.
pub fn sep_by<T: 'static, S: 'static>(p: &Parser<T>, sep: &Parser<S>) -> Parser<Vec<T>> {
    alt(&sep_by1(p, sep), &empty_list())
}

/// A token whose first byte satisfies `first` and whose remaining bytes
/// satisfy `rest`, yielding the matched input text.
///
/// Fails if the bytes taken stop inside a multi-byte UTF-8 character.
pub fn ident_of<F, R>(first: F, rest: R) -> Parser<String>
where
    F: Fn(u8) -> bool + 'static,
    R: Fn(u8) -> bool + 'static,
{
    let token = seq(&one_of(first), &rep(&one_of(rest)));
    Parser::new(move |session, offset| {
        token
            .parse_at(session, offset)
            .and_then(|_, end| match session.text().get(offset..end) {
                Some(matched) => Outcome::success(matched.to_string(), end),
                None => Outcome::Failure,
            })
    })
}

/// A non-empty run of bytes satisfying `pred`.
pub fn string_of<P>(pred: P) -> Parser<String>
where
    P: Fn(u8) -> bool + Clone + 'static,
{
    ident_of(pred.clone(), pred)
}

/// Skip zero or more spaces, yielding how many were skipped.
pub fn spaces() -> Parser<usize> {
    map(&rep(&chr(b' ')), |skipped| skipped.len())
}

/// Skip one or more spaces, yielding how many were skipped.
pub fn spaces1() -> Parser<usize> {
    map(&many1(&chr(b' ')), |skipped| skipped.len())
}

// === Space-tolerant sequencing ===
//
// The `_s` forms allow spaces between the operands, the `_s1` forms
// require at least one. Spaces are never skipped before the first operand
// or after the second.

/// `p1`, optional spaces, `p2`.
pub fn seq_s<A: 'static, B: 'static>(p1: &Parser<A>, p2: &Parser<B>) -> Parser<(A, B)> {
    seq(&seq_left(p1, &spaces()), p2)
}

/// `p1`, optional spaces, `p2`, keeping `p1`'s value.
pub fn seq_left_s<A: 'static, B: 'static>(p1: &Parser<A>, p2: &Parser<B>) -> Parser<A> {
    seq_left(&seq_left(p1, &spaces()), p2)
}

/// `p1`, optional spaces, `p2`, keeping `p2`'s value.
pub fn seq_right_s<A: 'static, B: 'static>(p1: &Parser<A>, p2: &Parser<B>) -> Parser<B> {
    seq_right(p1, &seq_right(&spaces(), p2))
}

/// `p1`, required spaces, `p2`.
pub fn seq_s1<A: 'static, B: 'static>(p1: &Parser<A>, p2: &Parser<B>) -> Parser<(A, B)> {
    seq(&seq_left(p1, &spaces1()), p2)
}

/// `p1`, required spaces, `p2`, keeping `p1`'s value.
pub fn seq_left_s1<A: 'static, B: 'static>(p1: &Parser<A>, p2: &Parser<B>) -> Parser<A> {
    seq_left(&seq_left(p1, &spaces1()), p2)
}

/// `p1`, required spaces, `p2`, keeping `p2`'s value.
pub fn seq_right_s1<A: 'static, B: 'static>(p1: &Parser<A>, p2: &Parser<B>) -> Parser<B> {
    seq_right(p1, &seq_right(&spaces1(), p2))
}

/// `Some` of `p`'s value, or `None` without consuming if `p` fails.
pub fn maybe<T: Clone + 'static>(p: &Parser<T>) -> Parser<Option<T>> {
    alt(&map(p, Some), &just(None))
}

/// `p` between `(` and `)`, keeping `p`'s value.
pub fn brackets<T: 'static>(p: &Parser<T>) -> Parser<T> {
    seq_left(&seq_right(&text("("), p), &text(")"))
}

/// One or more lowercase ASCII letters.
pub fn var() -> Parser<String> {
    string_of(lower())
}

// === Character classes ===

/// Bytes in `lo..=hi`.
pub fn range(lo: u8, hi: u8) -> impl Fn(u8) -> bool + Clone {
    move |c| (lo..=hi).contains(&c)
}

/// Bytes appearing in `set`.
pub fn any_of(set: &str) -> impl Fn(u8) -> bool + Clone {
    let mut members = [false; 256];
    for &b in set.as_bytes() {
        members[usize::from(b)] = true;
    }
    move |c| members[usize::from(c)]
}

/// `A`–`Z`.
pub fn upper() -> impl Fn(u8) -> bool + Clone {
    range(b'A', b'Z')
}

/// `a`–`z`.
pub fn lower() -> impl Fn(u8) -> bool + Clone {
    range(b'a', b'z')
}

/// `0`–`9`.
pub fn digit() -> impl Fn(u8) -> bool + Clone {
    range(b'0', b'9')
}
