//! Parse sessions and the driver.
//!
//! A [`Session`] exists for exactly one driver call. It borrows the input,
//! owns every memo table allocated while the parse runs, and records the
//! order in which they were allocated. When the parse returns, the tables
//! are released in reverse allocation order, so no parser in the graph is
//! left holding results for an input it will never see again.

use crate::config::RunConfig;
use crate::error::ParseError;
use crate::memo::MemoTables;
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::primitive::{eof, seq_left};
use tracing::debug;

/// Counters collected over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Memo tables allocated (one per rule evaluated at least once).
    pub tables_allocated: usize,
    /// Memo tables released when the run ended.
    pub tables_released: usize,
    /// `cache` evaluations answered from a memo table.
    pub memo_hits: usize,
    /// `cache` evaluations that had to run their rule.
    pub memo_misses: usize,
    /// Re-entries of a rule at an offset it was still evaluating.
    pub left_recursion_cuts: usize,
}

/// The outcome of a run together with its statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run<T> {
    /// What the parser produced.
    pub outcome: Outcome<T>,
    /// What the run cost.
    pub stats: RunStats,
}

/// State of a single parse of a single input.
pub struct Session<'t> {
    text: &'t str,
    config: RunConfig,
    memo: MemoTables,
}

impl<'t> Session<'t> {
    fn new(text: &'t str, config: RunConfig) -> Self {
        Session {
            text,
            config,
            memo: MemoTables::default(),
        }
    }

    /// The complete input being parsed.
    #[inline]
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// The input as bytes, the unit every offset counts in.
    #[inline]
    pub fn bytes(&self) -> &'t [u8] {
        self.text.as_bytes()
    }

    /// Length of the input in bytes.
    #[inline]
    pub fn input_len(&self) -> usize {
        self.text.len()
    }

    /// The configuration this run was started with.
    #[inline]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub(crate) fn memo_mut(&mut self) -> &mut MemoTables {
        &mut self.memo
    }

    /// Release every memo table, newest first.
    fn finish(mut self) -> RunStats {
        self.memo.unwind();
        self.memo.stats()
    }
}

/// Run `parser` over `text` from offset 0.
///
/// The parser need not consume the whole input; combine it with
/// [`eof`](crate::eof) or use [`parse_all`] for that.
pub fn run<T: 'static>(parser: &Parser<T>, text: &str) -> Outcome<T> {
    run_with(parser, text, &RunConfig::default()).outcome
}

/// Run `parser` over `text` with an explicit configuration.
pub fn run_with<T: 'static>(parser: &Parser<T>, text: &str, config: &RunConfig) -> Run<T> {
    debug!(
        len = text.len(),
        memoize = config.memoize,
        grow_stack = config.grow_stack,
        "parse started"
    );

    let mut session = Session::new(text, *config);
    let outcome = parser.parse_at(&mut session, 0);
    let stats = session.finish();

    debug!(
        matched = outcome.is_success(),
        end = ?outcome.offset(),
        tables = stats.tables_allocated,
        hits = stats.memo_hits,
        misses = stats.memo_misses,
        cuts = stats.left_recursion_cuts,
        "parse finished"
    );

    Run { outcome, stats }
}

/// Parse the complete input, returning only the value.
pub fn parse_all<T: 'static>(parser: &Parser<T>, text: &str) -> Result<T, ParseError> {
    run(&seq_left(parser, &eof()), text).into_result()
}

#[cfg(test)]
mod tests;
