//! One-shot deferred values for recursive grammar rules.
//!
//! A grammar rule that refers to itself, or to a sibling rule that has not
//! been built yet, cannot be constructed eagerly. Each such rule is instead
//! declared as a [`Lazy`] cell, every cell is then defined with a producer,
//! and the rules refer to each other through [`cache`](crate::cache).
//! Evaluation re-enters the cell; construction never does, so the graph
//! stays finite.
//!
//! ```text
//! let list: Lazy<Parser<Vec<u32>>> = Lazy::declare();
//! let tail = seq_right(&chr(b','), &cache(&list));
//! list.define(move || /* ... uses `tail` ... */);
//! run(&cache(&list), "1,2,3");
//! ```
//!
//! A `cache` parser owns a handle to its cell, so a grammar can be built
//! inside a function and returned as a bare [`Parser`](crate::Parser).
//! A rule that refers to itself owns itself through that handle, so a
//! recursive grammar is never freed. Build such grammars once and reuse
//! them.

use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a lazy cell, stable for the cell's lifetime.
///
/// Memo tables are keyed by the cell, so every [`cache`](crate::cache)
/// wrapper over the same cell shares one table per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u64);

impl CellId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        CellId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric identity.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

type Producer<T> = Box<dyn FnOnce() -> T>;

struct Cell<T> {
    id: CellId,
    producer: RefCell<Option<Producer<T>>>,
    value: OnceCell<T>,
}

impl<T> Cell<T> {
    fn force(&self) -> &T {
        self.value.get_or_init(|| {
            let producer = self.producer.borrow_mut().take();
            match producer {
                Some(produce) => produce(),
                None => panic!(
                    "lazy cell {} forced before it was defined or from inside its own producer",
                    self.id.raw()
                ),
            }
        })
    }
}

/// A deferred value computed at most once.
///
/// Cloning a `Lazy` clones the handle, not the value: all clones share the
/// same producer and realized value.
pub struct Lazy<T> {
    cell: Rc<Cell<T>>,
}

impl<T> Lazy<T> {
    /// Create a cell whose producer is already known.
    pub fn new<F: FnOnce() -> T + 'static>(producer: F) -> Self {
        let lazy = Self::declare();
        lazy.define(producer);
        lazy
    }

    /// Create a cell whose producer will be supplied later with
    /// [`Lazy::define`].
    pub fn declare() -> Self {
        Lazy {
            cell: Rc::new(Cell {
                id: CellId::fresh(),
                producer: RefCell::new(None),
                value: OnceCell::new(),
            }),
        }
    }

    /// Install the producer of a declared cell.
    ///
    /// # Panics
    /// Panics if the cell already has a producer or a value.
    pub fn define<F: FnOnce() -> T + 'static>(&self, producer: F) {
        if self.is_defined() {
            panic!("lazy cell {} defined twice", self.cell.id.raw());
        }
        *self.cell.producer.borrow_mut() = Some(Box::new(producer));
    }

    /// Get the value, running the producer on first access only.
    ///
    /// # Panics
    /// Panics if the cell was never defined, or if the producer forces the
    /// cell it is producing.
    pub fn force(&self) -> &T {
        self.cell.force()
    }

    /// Returns `true` once a producer has been installed (or already run).
    pub fn is_defined(&self) -> bool {
        self.cell.value.get().is_some() || self.cell.producer.borrow().is_some()
    }

    /// Returns `true` if the producer has already run.
    pub fn is_forced(&self) -> bool {
        self.cell.value.get().is_some()
    }

    /// This cell's identity.
    #[inline]
    pub fn id(&self) -> CellId {
        self.cell.id
    }
}

impl<T> Clone for Lazy<T> {
    fn clone(&self) -> Self {
        Lazy {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_forced() {
            "forced"
        } else if self.is_defined() {
            "deferred"
        } else {
            "undefined"
        };
        f.debug_struct("Lazy")
            .field("id", &self.cell.id.raw())
            .field("state", &state)
            .finish()
    }
}
