//! Packrat parser combinators.
//!
//! Grammars are built from small [`Parser`] values composed with the
//! [primitive](primitive) and [derived](derived) combinators. Recursive
//! rules are declared as [`Lazy`] cells and referenced through [`cache`],
//! which memoizes each rule at each input offset for the duration of one
//! [`run`]. Memo tables belong to the run, not to the grammar, so a grammar
//! is built once and reused for any number of inputs.
//!
//! ```text
//! let num = map(&string_of(digit()), |s| s.parse::<u32>().unwrap_or(0));
//! let list: Lazy<Parser<Vec<u32>>> = Lazy::declare();
//! let rest = alt(&seq_right(&chr(b','), &cache(&list)), &just(Vec::new()));
//! let items = map(&seq(&num, &rest), |(n, mut tail)| {
//!     tail.insert(0, n);
//!     tail
//! });
//! list.define(move || alt(&items, &just(Vec::new())));
//! assert_eq!(parse_all(&cache(&list), "1,23,456"), Ok(vec![1, 23, 456]));
//! ```
//!
//! Parsing is ordered-choice (PEG) and yields success or failure only:
//! failures carry no position or message. Left-recursive rules do not loop;
//! the inner re-entry fails, so write rules right-recursively or with
//! repetition.
//!
//! # Tracing
//!
//! The crate logs through `tracing`:
//!
//! - `RUST_LOG=packrat=debug`: one event at the start and end of each run,
//!   with memo statistics.
//! - `RUST_LOG=packrat=trace`: memo table allocation, left-recursion cuts
//!   and repetitions that stopped without progress.

mod config;
pub mod derived;
mod error;
mod lazy;
mod memo;
mod outcome;
mod parser;
mod pattern;
pub mod primitive;
mod session;
pub mod stack;

use std::sync::Once;

pub use config::RunConfig;
pub use derived::{
    any_of, brackets, digit, ident_of, lower, many1, maybe, range, sep_by, sep_by1, seq_left_s,
    seq_left_s1, seq_right_s, seq_right_s1, seq_s, seq_s1, spaces, spaces1, string_of, upper,
    var,
};
pub use error::{GrammarError, ParseError};
pub use lazy::{CellId, Lazy};
pub use memo::cache;
pub use outcome::Outcome;
pub use parser::Parser;
pub use pattern::{matching, regex, AnchoredMatcher, Pattern};
pub use primitive::{
    alt, chr, eof, fail, just, map, none_of, one_of, position, rep, seq, seq_left, seq_right,
    text,
};
pub use session::{parse_all, run, run_with, Run, RunStats, Session};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output for debugging grammars.
///
/// Call this once at startup. Safe to call multiple times.
/// Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            if let Err(err) = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init()
            {
                tracing::debug!(%err, "keeping the host's tracing subscriber");
            }
        }
    });
}
