//! Packrat memoization.
//!
//! [`cache`] turns a lazily defined rule into a memoized parser. Memo
//! tables do not live in the parser: they live in the running
//! [`Session`](crate::Session), keyed by the rule's [`CellId`], one slot
//! per input offset (`0..=len`). A rule is therefore evaluated at most once
//! per offset per run, and a finished run leaves nothing behind in the
//! grammar.
//!
//! # Slot states
//!
//! | State | Meaning | On lookup |
//! |-------|---------|-----------|
//! | `Vacant` | Never evaluated here | Mark `Pending`, evaluate |
//! | `Pending` | Evaluation in flight | Fail (left-recursion cut) |
//! | `Done` | Evaluated | Return the stored outcome |
//!
//! The `Pending` state is what makes every grammar terminate: a rule that
//! reaches itself again without consuming input fails on the inner call
//! instead of recursing forever.

use crate::lazy::{CellId, Lazy};
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::session::RunStats;
use crate::stack::with_stack;
use rustc_hash::FxHashMap;
use std::any::Any;
use tracing::trace;

enum Slot<T> {
    Vacant,
    Pending,
    Done(Outcome<T>),
}

struct Table<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Table<T> {
    fn new(input_len: usize) -> Self {
        Table {
            slots: (0..=input_len).map(|_| Slot::Vacant).collect(),
        }
    }
}

/// Result of consulting a memo table before evaluating a rule.
enum Lookup<T> {
    /// The outcome is already known.
    Hit(Outcome<T>),
    /// The rule is being evaluated at this offset right now.
    Cut,
    /// Not evaluated yet; the slot has been marked pending.
    Miss,
}

/// Per-session side table: rule → offset → outcome.
#[derive(Default)]
pub(crate) struct MemoTables {
    tables: FxHashMap<CellId, Box<dyn Any>>,
    /// Allocation order, released newest first.
    undo: Vec<CellId>,
    stats: RunStats,
}

impl MemoTables {
    fn table<T: 'static>(&mut self, id: CellId, input_len: usize) -> &mut Table<T> {
        let stats = &mut self.stats;
        let undo = &mut self.undo;
        let table = self.tables.entry(id).or_insert_with(|| {
            trace!(cell = id.raw(), slots = input_len + 1, "memo table allocated");
            stats.tables_allocated += 1;
            undo.push(id);
            Box::new(Table::<T>::new(input_len))
        });
        match table.downcast_mut::<Table<T>>() {
            Some(table) => table,
            None => unreachable!("memo table for cell {} holds another type", id.raw()),
        }
    }

    fn lookup<T: Clone + 'static>(
        &mut self,
        id: CellId,
        offset: usize,
        input_len: usize,
    ) -> Lookup<T> {
        let slot = &mut self.table::<T>(id, input_len).slots[offset];
        let lookup = match slot {
            Slot::Done(outcome) => Lookup::Hit(outcome.clone()),
            Slot::Pending => Lookup::Cut,
            Slot::Vacant => {
                *slot = Slot::Pending;
                Lookup::Miss
            }
        };
        match lookup {
            Lookup::Hit(_) => self.stats.memo_hits += 1,
            Lookup::Cut => {
                trace!(cell = id.raw(), offset, "left recursion cut");
                self.stats.left_recursion_cuts += 1;
            }
            Lookup::Miss => self.stats.memo_misses += 1,
        }
        lookup
    }

    fn store<T: 'static>(
        &mut self,
        id: CellId,
        offset: usize,
        input_len: usize,
        outcome: Outcome<T>,
    ) {
        self.table::<T>(id, input_len).slots[offset] = Slot::Done(outcome);
    }

    /// Drop every table in reverse allocation order.
    pub(crate) fn unwind(&mut self) {
        while let Some(id) = self.undo.pop() {
            if self.tables.remove(&id).is_some() {
                self.stats.tables_released += 1;
            }
        }
    }

    pub(crate) fn stats(&self) -> RunStats {
        self.stats
    }
}

/// Memoize the rule held in `lazy`.
///
/// The returned parser forces the cell the first time it is evaluated and
/// consults the session's memo table for the cell on every evaluation.
/// All `cache` wrappers over the same cell share one table per run.
/// Offsets past the end of the input fail without touching the table.
///
/// The parser shares ownership of the cell, so the `Lazy` handle used to
/// build it may be dropped.
///
/// # Panics
/// Evaluating the parser panics if the cell was never defined.
pub fn cache<T: Clone + 'static>(lazy: &Lazy<Parser<T>>) -> Parser<T> {
    let cell = lazy.clone();
    Parser::new(move |session, offset| {
        let input_len = session.input_len();
        if offset > input_len {
            return Outcome::Failure;
        }
        let config = *session.config();
        let id = cell.id();

        if !config.memoize {
            return with_stack(config.grow_stack, || cell.force().parse_at(session, offset));
        }

        match session.memo_mut().lookup::<T>(id, offset, input_len) {
            Lookup::Hit(outcome) => return outcome,
            Lookup::Cut => return Outcome::Failure,
            Lookup::Miss => {}
        }

        let outcome = with_stack(config.grow_stack, || cell.force().parse_at(session, offset));
        session.memo_mut().store(id, offset, input_len, outcome.clone());
        outcome
    })
}

#[cfg(test)]
mod tests;
