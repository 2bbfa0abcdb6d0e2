//! mica-util - Shared infrastructure for the mica front end.
//!
//! This crate provides the pieces every front-end phase leans on:
//!
//! - [`Pos`] - line/column source positions for error reporting
//! - [`Heap`] - the scoped arena allocator backing a lexer/parse
//!   session and the AST it produces
//! - [`HeapError`] - allocation failure, surfaced by the parser as an
//!   out-of-memory parse event
//!
//! The front end targets memory-constrained hosts, so allocation is
//! organised around a caller-supplied heap rather than unrestricted
//! use of the global allocator: the embedder creates one [`Heap`] per
//! session (optionally with a byte budget), hands it to the parser,
//! and tears the whole session down at once.

pub mod error;
pub mod heap;
pub mod pos;

pub use error::{HeapError, HeapResult};
pub use heap::Heap;
pub use pos::Pos;
