//! Scoped heap handle backing the lexer session and the AST.
//!
//! `Heap` is a bump arena with an optional byte budget. Allocation is
//! cheap and individual nodes are never freed; the whole region is
//! reclaimed at once on [`Heap::reset`] or drop. The budget models the
//! fixed memory pool of an embedded deployment: once it is spent,
//! further allocations fail with [`HeapError::OutOfMemory`] and the
//! caller surfaces that as an out-of-memory parse event.
//!
//! # Examples
//!
//! ```
//! use mica_util::Heap;
//!
//! let heap = Heap::new();
//! let n = heap.alloc(42u64).unwrap();
//! assert_eq!(*n, 42);
//!
//! let s = heap.alloc_str("hello").unwrap();
//! assert_eq!(s, "hello");
//! ```

use std::cell::Cell;
use std::mem;

use bumpalo::Bump;

use crate::error::HeapError;

/// Arena allocator shared by a lexer/parse session.
///
/// AST nodes borrow from the heap (`&'h Node<'h>`), so the tree can
/// never outlive the handle that backs it.
pub struct Heap {
    bump: Bump,
    /// Bytes charged so far (payload bytes, not block overhead).
    used: Cell<usize>,
    /// Budget in payload bytes; `None` means unbounded.
    limit: Option<usize>,
}

impl Heap {
    /// Create an unbounded heap.
    pub fn new() -> Self {
        Self {
            bump: Bump::new(),
            used: Cell::new(0),
            limit: None,
        }
    }

    /// Create a heap with a byte budget.
    ///
    /// The budget counts payload bytes handed out by `alloc` and
    /// `alloc_str`; once exceeded, allocations fail.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            bump: Bump::new(),
            used: Cell::new(0),
            limit: Some(limit),
        }
    }

    /// Allocate a value in the heap.
    pub fn alloc<T>(&self, value: T) -> Result<&mut T, HeapError> {
        self.charge(mem::size_of::<T>())?;
        Ok(self.bump.alloc(value))
    }

    /// Copy a string into the heap.
    ///
    /// The source buffer may be reused immediately after this returns.
    pub fn alloc_str(&self, s: &str) -> Result<&str, HeapError> {
        self.charge(s.len())?;
        Ok(self.bump.alloc_str(s))
    }

    /// Bytes charged against the budget so far.
    pub fn allocated_bytes(&self) -> usize {
        self.used.get()
    }

    /// Remaining budget, or `usize::MAX` when unbounded.
    pub fn remaining(&self) -> usize {
        match self.limit {
            Some(limit) => limit.saturating_sub(self.used.get()),
            None => usize::MAX,
        }
    }

    /// Release everything allocated from this heap.
    ///
    /// Requires exclusive access, which statically guarantees no node
    /// allocated from this heap is still borrowed.
    pub fn reset(&mut self) {
        self.bump.reset();
        self.used.set(0);
    }

    fn charge(&self, n: usize) -> Result<(), HeapError> {
        if let Some(limit) = self.limit {
            let used = self.used.get();
            if n > limit.saturating_sub(used) {
                return Err(HeapError::OutOfMemory {
                    requested: n,
                    remaining: limit - used,
                });
            }
        }
        self.used.set(self.used.get() + n);
        Ok(())
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
