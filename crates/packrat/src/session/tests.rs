use super::*;
use crate::{cache, chr, just, text, Lazy};
use pretty_assertions::assert_eq;

fn a_list() -> Parser<usize> {
    // list = 'a' list / ε, counting the `a`s.
    let list: Lazy<Parser<usize>> = Lazy::declare();
    let tail = cache(&list);
    list.define(move || {
        crate::alt(
            &crate::map(&crate::seq_right(&chr(b'a'), &tail), |n| n + 1),
            &just(0),
        )
    });
    cache(&list)
}

#[test]
fn test_run_reports_stats_and_releases_tables() {
    let p = a_list();
    let result = run_with(&p, "aaa", &RunConfig::default());

    assert_eq!(result.outcome, Outcome::success(3, 3));
    assert_eq!(
        result.stats,
        RunStats {
            tables_allocated: 1,
            tables_released: 1,
            memo_hits: 0,
            memo_misses: 4,
            left_recursion_cuts: 0,
        }
    );
}

#[test]
fn test_grammar_reused_across_inputs() {
    let p = a_list();
    assert_eq!(run(&p, "aaaa"), Outcome::success(4, 4));
    assert_eq!(run(&p, "a"), Outcome::success(1, 1));
    assert_eq!(run(&p, ""), Outcome::success(0, 0));
    assert_eq!(run(&p, "ab"), Outcome::success(1, 1));
}

#[test]
fn test_run_does_not_require_full_consumption() {
    assert_eq!(run(&text("foo"), "foobar"), Outcome::success("foo".to_string(), 3));
}

#[test]
fn test_parse_all_requires_full_consumption() {
    assert_eq!(parse_all(&text("foo"), "foo"), Ok("foo".to_string()));
    assert_eq!(parse_all(&text("foo"), "foobar"), Err(ParseError::NoMatch));
    assert_eq!(parse_all(&text("foo"), "fo"), Err(ParseError::NoMatch));
}

#[test]
fn test_session_accessors() {
    let snapshot = Parser::new(|session, offset| {
        let seen = (
            session.text().to_string(),
            session.bytes().len(),
            session.input_len(),
            session.config().memoize,
        );
        Outcome::success(seen, offset)
    });
    let config = RunConfig::new().memoize(false);
    assert_eq!(
        run_with(&snapshot, "héllo", &config).outcome,
        Outcome::success(("héllo".to_string(), 6, 6, false), 0)
    );
}

#[test]
fn test_nested_run_is_independent() {
    // A parser that starts a fresh run on a fixed input from inside a run.
    let inner = a_list();
    let nested = Parser::new(move |session, offset| {
        let inner_outcome = run(&inner, "aa");
        chr(b'a')
            .parse_at(session, offset)
            .map(|_| inner_outcome.value().copied())
    });
    assert_eq!(run(&nested, "a"), Outcome::success(Some(2), 1));
}
