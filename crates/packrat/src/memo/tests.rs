use super::*;
use crate::{alt, chr, just, map, rep, run, run_with, seq_left, seq_right, RunConfig};
use pretty_assertions::assert_eq;
use std::cell::Cell as Counter;
use std::rc::Rc;

/// A parser matching one `x`, counting how often it is evaluated.
fn counting_x(calls: &Rc<Counter<usize>>) -> Parser<u8> {
    let calls = Rc::clone(calls);
    let x = chr(b'x');
    Parser::new(move |session, offset| {
        calls.set(calls.get() + 1);
        x.parse_at(session, offset)
    })
}

#[test]
fn test_rule_evaluated_once_per_offset() {
    let calls = Rc::new(Counter::new(0));
    let inner = counting_x(&calls);
    let rule = Lazy::new(move || inner);
    let cached = cache(&rule);

    // Both alternatives try the rule at offset 0.
    let p = alt(&seq_left(&cached, &chr(b'!')), &cached);
    let outcome = run_with(&p, "x", &RunConfig::default());

    assert_eq!(outcome.outcome, Outcome::success(b'x', 1));
    assert_eq!(calls.get(), 1);
    assert_eq!(outcome.stats.memo_misses, 1);
    assert_eq!(outcome.stats.memo_hits, 1);
}

#[test]
fn test_wrappers_over_one_cell_share_a_table() {
    let calls = Rc::new(Counter::new(0));
    let inner = counting_x(&calls);
    let rule = Lazy::new(move || inner);
    let first = cache(&rule);
    let second = cache(&rule);

    let p = alt(&seq_left(&first, &chr(b'!')), &second);
    let outcome = run_with(&p, "x", &RunConfig::default());

    assert_eq!(outcome.outcome, Outcome::success(b'x', 1));
    assert_eq!(calls.get(), 1);
    assert_eq!(outcome.stats.tables_allocated, 1);
}

#[test]
fn test_memo_does_not_leak_between_runs() {
    let calls = Rc::new(Counter::new(0));
    let inner = counting_x(&calls);
    let rule = Lazy::new(move || inner);
    let p = cache(&rule);

    assert_eq!(run(&p, "x"), Outcome::success(b'x', 1));
    assert_eq!(run(&p, "y"), Outcome::Failure);
    assert_eq!(run(&p, "x"), Outcome::success(b'x', 1));
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_offset_past_end_fails_without_allocating() {
    let rule = Lazy::new(|| chr(b'x'));
    let cached = cache(&rule);
    let beyond = Parser::new(move |session, _| {
        let past = session.input_len() + 1;
        cached.parse_at(session, past)
    });

    let outcome = run_with(&beyond, "x", &RunConfig::default());
    assert_eq!(outcome.outcome, Outcome::Failure);
    assert_eq!(outcome.stats.tables_allocated, 0);
    assert!(!rule.is_forced());
}

#[test]
fn test_offset_at_end_is_a_valid_slot() {
    let rule = Lazy::new(|| rep(&chr(b'x')));
    let p = seq_right(&chr(b'x'), &cache(&rule));
    assert_eq!(run(&p, "x"), Outcome::success(Vec::new(), 1));
}

#[test]
fn test_left_recursion_is_cut() {
    // rule = rule 'a' / 'a'
    let rule: Lazy<Parser<u8>> = Lazy::declare();
    let this = cache(&rule);
    rule.define(move || alt(&seq_right(&this, &chr(b'a')), &chr(b'a')));

    let outcome = run_with(&cache(&rule), "aaa", &RunConfig::default());
    assert_eq!(outcome.outcome, Outcome::success(b'a', 1));
    assert_eq!(outcome.stats.left_recursion_cuts, 1);
}

#[test]
fn test_memoize_off_reevaluates() {
    let calls = Rc::new(Counter::new(0));
    let inner = counting_x(&calls);
    let rule = Lazy::new(move || inner);
    let cached = cache(&rule);
    let p = alt(&seq_left(&cached, &chr(b'!')), &cached);

    let config = RunConfig::new().memoize(false);
    let outcome = run_with(&p, "x", &config);

    assert_eq!(outcome.outcome, Outcome::success(b'x', 1));
    assert_eq!(calls.get(), 2);
    assert_eq!(outcome.stats, RunStats::default());
}

#[test]
fn test_tables_released_in_reverse_order() {
    let mut memo = MemoTables::default();
    let a: Lazy<Parser<u8>> = Lazy::declare();
    let b: Lazy<Parser<u8>> = Lazy::declare();

    assert!(matches!(memo.lookup::<u8>(a.id(), 0, 2), Lookup::Miss));
    assert!(matches!(memo.lookup::<u8>(b.id(), 1, 2), Lookup::Miss));
    assert!(matches!(memo.lookup::<u8>(a.id(), 0, 2), Lookup::Cut));
    memo.store(a.id(), 0, 2, Outcome::success(b'a', 1));
    assert!(matches!(
        memo.lookup::<u8>(a.id(), 0, 2),
        Lookup::Hit(Outcome::Success { value: b'a', offset: 1 })
    ));
    assert_eq!(memo.undo, vec![a.id(), b.id()]);

    memo.unwind();
    assert!(memo.tables.is_empty());
    assert!(memo.undo.is_empty());
    let stats = memo.stats();
    assert_eq!(stats.tables_allocated, 2);
    assert_eq!(stats.tables_released, 2);
    assert_eq!(stats.memo_misses, 2);
    assert_eq!(stats.memo_hits, 1);
    assert_eq!(stats.left_recursion_cuts, 1);
}

/// `xs = 'x' xs / ε`, counting the `x`s, with the rule cell left behind.
fn x_counter() -> Parser<usize> {
    let rule: Lazy<Parser<usize>> = Lazy::declare();
    let tail = cache(&rule);
    rule.define(move || alt(&map(&seq_right(&chr(b'x'), &tail), |n| n + 1), &just(0)));
    cache(&rule)
}

#[test]
fn test_returned_grammar_owns_its_rules() {
    let p = x_counter();
    assert_eq!(run(&p, "xxx"), Outcome::success(3, 3));
    assert_eq!(run(&p, "y"), Outcome::success(0, 0));
}

#[test]
fn test_cache_over_temporary_cell() {
    let p = cache(&Lazy::new(|| chr(b'x')));
    assert_eq!(run(&p, "x"), Outcome::success(b'x', 1));
}

#[test]
#[should_panic(expected = "forced before it was defined")]
fn test_undefined_rule_panics() {
    let rule: Lazy<Parser<u8>> = Lazy::declare();
    let _ = run(&cache(&rule), "x");
}
